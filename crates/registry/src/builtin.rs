//! Built-in components.

use schemars::JsonSchema;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{json, Map, Value};
use std::sync::Arc;

use crewkit_core::{
    traits::{Component, ComponentFactory},
    types::ComponentOutput,
    Error, Result,
};

use crate::registry::ComponentRegistry;

/// Module path the built-in classes are catalogued under.
pub const BUILTIN_MODULE: &str = "crewkit.builtin";

/// Register every built-in component under its type name.
pub fn register_builtins(registry: &ComponentRegistry) {
    let builtins: [Arc<dyn ComponentFactory>; 3] =
        [Arc::new(EchoTool), Arc::new(CalculatorTool), Arc::new(TemplateTool)];

    for factory in builtins {
        registry.register(factory.type_name().to_string(), factory);
    }
}

fn parse_config<T: DeserializeOwned>(type_name: &str, config: &Map<String, Value>) -> Result<T> {
    serde_json::from_value(Value::Object(config.clone()))
        .map_err(|e| Error::component_construction(type_name, e.to_string()))
}

fn config_schema<T: JsonSchema>() -> Value {
    serde_json::to_value(schemars::schema_for!(T)).unwrap_or_default()
}

// =============================================================================
// Echo Tool
// =============================================================================

/// Echo configuration.
#[derive(Debug, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct EchoConfig {
    /// Text placed before every echoed message.
    #[serde(default = "default_echo_prefix")]
    pub prefix: String,
}

fn default_echo_prefix() -> String {
    "Echo: ".to_string()
}

/// Simple echo component type for testing.
pub struct EchoTool;

impl ComponentFactory for EchoTool {
    fn type_name(&self) -> &str {
        "echo"
    }

    fn description(&self) -> &str {
        "Echoes the input message back"
    }

    fn parameters(&self) -> Value {
        config_schema::<EchoConfig>()
    }

    fn construct(&self, config: &Map<String, Value>) -> Result<Box<dyn Component>> {
        let config: EchoConfig = parse_config(self.type_name(), config)?;
        Ok(Box::new(Echo {
            prefix: config.prefix,
        }))
    }
}

struct Echo {
    prefix: String,
}

impl Component for Echo {
    fn name(&self) -> &str {
        "echo"
    }

    fn run(&self, input: Value) -> Result<ComponentOutput> {
        let message = input
            .get("message")
            .and_then(|v| v.as_str())
            .unwrap_or("No message provided");

        Ok(ComponentOutput::text(format!("{}{}", self.prefix, message)))
    }
}

// =============================================================================
// Calculator Tool
// =============================================================================

/// Calculator configuration.
#[derive(Debug, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct CalculatorConfig {
    /// Decimal places to round results to.
    #[serde(default)]
    pub precision: Option<u32>,
}

/// Basic arithmetic component type.
pub struct CalculatorTool;

impl ComponentFactory for CalculatorTool {
    fn type_name(&self) -> &str {
        "calculator"
    }

    fn description(&self) -> &str {
        "Perform basic arithmetic operations"
    }

    fn parameters(&self) -> Value {
        config_schema::<CalculatorConfig>()
    }

    fn construct(&self, config: &Map<String, Value>) -> Result<Box<dyn Component>> {
        let config: CalculatorConfig = parse_config(self.type_name(), config)?;
        Ok(Box::new(Calculator {
            precision: config.precision,
        }))
    }
}

struct Calculator {
    precision: Option<u32>,
}

impl Calculator {
    fn round(&self, value: f64) -> f64 {
        match self.precision {
            Some(places) => {
                let factor = 10f64.powi(places.min(15) as i32);
                (value * factor).round() / factor
            }
            None => value,
        }
    }
}

/// Arithmetic request accepted by the calculator.
#[derive(Debug, Deserialize)]
struct CalculatorInput {
    operation: Operation,
    a: f64,
    b: f64,
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "lowercase")]
enum Operation {
    Add,
    Subtract,
    Multiply,
    Divide,
}

impl Operation {
    fn symbol(self) -> char {
        match self {
            Self::Add => '+',
            Self::Subtract => '-',
            Self::Multiply => '*',
            Self::Divide => '/',
        }
    }

    fn apply(self, a: f64, b: f64) -> Option<f64> {
        match self {
            Self::Add => Some(a + b),
            Self::Subtract => Some(a - b),
            Self::Multiply => Some(a * b),
            Self::Divide if b == 0.0 => None,
            Self::Divide => Some(a / b),
        }
    }
}

impl Component for Calculator {
    fn name(&self) -> &str {
        "calculator"
    }

    fn run(&self, input: Value) -> Result<ComponentOutput> {
        let CalculatorInput { operation, a, b } = serde_json::from_value(input)
            .map_err(|e| Error::component_execution(format!("calculator: {}", e)))?;

        let Some(result) = operation.apply(a, b) else {
            return Ok(ComponentOutput::error("Division by zero"));
        };
        let result = self.round(result);

        Ok(
            ComponentOutput::text(format!("{} {} {} = {}", a, operation.symbol(), b, result))
                .with_data(json!({ "result": result })),
        )
    }
}

// =============================================================================
// Template Tool
// =============================================================================

/// Template configuration.
#[derive(Debug, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct TemplateConfig {
    /// Text with `{{key}}` placeholders filled from the input object.
    pub template: String,
}

/// Placeholder-substitution component type.
pub struct TemplateTool;

impl ComponentFactory for TemplateTool {
    fn type_name(&self) -> &str {
        "template"
    }

    fn description(&self) -> &str {
        "Fill {{key}} placeholders in a configured template"
    }

    fn parameters(&self) -> Value {
        config_schema::<TemplateConfig>()
    }

    fn construct(&self, config: &Map<String, Value>) -> Result<Box<dyn Component>> {
        let config: TemplateConfig = parse_config(self.type_name(), config)?;
        Ok(Box::new(Template {
            template: config.template,
        }))
    }
}

struct Template {
    template: String,
}

impl Component for Template {
    fn name(&self) -> &str {
        "template"
    }

    fn run(&self, input: Value) -> Result<ComponentOutput> {
        let fields = input
            .as_object()
            .ok_or_else(|| Error::component_execution("template input must be an object"))?;

        let mut rendered = self.template.clone();
        for (key, value) in fields {
            let text = match value {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            };
            rendered = rendered.replace(&format!("{{{{{}}}}}", key), &text);
        }

        Ok(ComponentOutput::text(rendered))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(value: Value) -> Map<String, Value> {
        value.as_object().cloned().unwrap_or_default()
    }

    #[test]
    fn test_echo() {
        let echo = EchoTool.construct(&Map::new()).unwrap();
        let output = echo.run(json!({"message": "Hello"})).unwrap();

        assert!(output.success);
        assert_eq!(output.content, "Echo: Hello");

        let shout = EchoTool.construct(&config(json!({"prefix": ">> "}))).unwrap();
        assert_eq!(shout.run(json!({"message": "hi"})).unwrap().content, ">> hi");
    }

    #[test]
    fn test_echo_rejects_unknown_config() {
        let err = EchoTool.construct(&config(json!({"volume": 11}))).err().unwrap();
        assert!(matches!(err, Error::ComponentConstruction { component, .. } if component == "echo"));
    }

    #[test]
    fn test_calculator() {
        let calc = CalculatorTool.construct(&Map::new()).unwrap();

        let output = calc.run(json!({"operation": "add", "a": 2, "b": 3})).unwrap();
        assert_eq!(output.data, Some(json!({"result": 5.0})));

        let output = calc.run(json!({"operation": "divide", "a": 1, "b": 0})).unwrap();
        assert!(!output.success);

        assert!(calc.run(json!({"operation": "add", "a": 1})).is_err());
        assert!(calc.run(json!({"operation": "modulo", "a": 1, "b": 2})).is_err());
    }

    #[test]
    fn test_calculator_precision() {
        let calc = CalculatorTool.construct(&config(json!({"precision": 2}))).unwrap();
        let output = calc.run(json!({"operation": "divide", "a": 1, "b": 3})).unwrap();
        assert_eq!(output.data, Some(json!({"result": 0.33})));
        assert_eq!(output.content, "1 / 3 = 0.33");
    }

    #[test]
    fn test_template() {
        let template = TemplateTool
            .construct(&config(json!({"template": "Dear {{name}}, you owe {{amount}}."})))
            .unwrap();
        let output = template.run(json!({"name": "Ada", "amount": 12})).unwrap();
        assert_eq!(output.content, "Dear Ada, you owe 12.");
    }

    #[test]
    fn test_template_requires_template() {
        assert!(TemplateTool.construct(&Map::new()).is_err());
    }

    #[test]
    fn test_register_builtins() {
        let registry = ComponentRegistry::new();
        register_builtins(&registry);

        assert_eq!(registry.len(), 3);
        assert!(registry.contains("echo"));
        assert!(registry.contains("calculator"));
        assert!(registry.contains("template"));
    }
}
