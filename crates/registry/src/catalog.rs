//! Module catalog.
//!
//! Manifests name component types by `module` and `class`. Instead of
//! importing code by path at runtime, every type that may be named in a
//! manifest is registered here at startup, and manifest loading resolves
//! against this table.

use std::collections::HashMap;
use std::sync::Arc;

use crewkit_core::{traits::ComponentFactory, Error, Result};

use crate::builtin::{CalculatorTool, EchoTool, TemplateTool, BUILTIN_MODULE};

/// Table of `module -> class -> component type`.
#[derive(Default)]
pub struct ModuleCatalog {
    modules: HashMap<String, HashMap<String, Arc<dyn ComponentFactory>>>,
}

impl ModuleCatalog {
    /// Create an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a catalog holding the built-in components.
    pub fn with_builtins() -> Self {
        let mut catalog = Self::new();
        catalog
            .register(BUILTIN_MODULE, "EchoTool", Arc::new(EchoTool))
            .register(BUILTIN_MODULE, "CalculatorTool", Arc::new(CalculatorTool))
            .register(BUILTIN_MODULE, "TemplateTool", Arc::new(TemplateTool));
        catalog
    }

    /// Make `class` in `module` resolvable.
    pub fn register(
        &mut self,
        module: impl Into<String>,
        class: impl Into<String>,
        factory: Arc<dyn ComponentFactory>,
    ) -> &mut Self {
        self.modules
            .entry(module.into())
            .or_default()
            .insert(class.into(), factory);
        self
    }

    /// Resolve `class` within `module`.
    pub fn resolve(&self, module: &str, class: &str) -> Result<Arc<dyn ComponentFactory>> {
        let classes = self
            .modules
            .get(module)
            .ok_or_else(|| Error::component_not_found(format!("module '{}' is not registered", module)))?;

        classes.get(class).cloned().ok_or_else(|| {
            Error::component_not_found(format!("module '{}' has no class '{}'", module, class))
        })
    }

    /// Registered modules, sorted.
    pub fn modules(&self) -> Vec<&str> {
        let mut modules: Vec<&str> = self.modules.keys().map(String::as_str).collect();
        modules.sort_unstable();
        modules
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtins_resolve() {
        let catalog = ModuleCatalog::with_builtins();

        let echo = catalog.resolve(BUILTIN_MODULE, "EchoTool").unwrap();
        assert_eq!(echo.type_name(), "echo");
        assert_eq!(catalog.modules(), vec![BUILTIN_MODULE]);
    }

    #[test]
    fn test_unknown_module_and_class() {
        let catalog = ModuleCatalog::with_builtins();

        let err = catalog.resolve("tools.web", "WebSearch").err().unwrap();
        assert!(err.to_string().contains("module 'tools.web' is not registered"));

        let err = catalog.resolve(BUILTIN_MODULE, "WebSearch").err().unwrap();
        assert!(err.to_string().contains("has no class 'WebSearch'"));
    }
}
