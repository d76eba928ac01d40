pub mod composition;

use crate::catalog::Category;
use crate::error::BlockError;
use crate::render::{Args, GenerationRule, has_placeholders, substitute_placeholders};
use crate::schema::{ElementSchema, schema_for};
use crate::value::{ParamValue, Parameters};

/// An immutable palette entry from which block instances are created.
#[derive(Debug, Clone)]
pub struct BlockDefinition {
    /// Display label.
    pub name: String,
    pub category: Category,
    /// Selects the parameter schema and generation rule.
    pub element_type: String,
    /// Fragment used when no generation rule applies.
    pub default_template: String,
    pub default_parameters: Parameters,
    /// Category-tinted display colour. Not used by generation.
    pub color: String,
    rule: Option<GenerationRule>,
}

impl BlockDefinition {
    /// Definition for a registered element type. The default template is
    /// the rule's output for the default parameters.
    pub fn from_schema(name: impl Into<String>, schema: &ElementSchema) -> Self {
        let default_parameters = schema.default_parameters();
        let default_template = (schema.rule)(&Args::new(&default_parameters));
        BlockDefinition {
            name: name.into(),
            category: schema.category,
            element_type: schema.element_type.to_string(),
            default_template,
            default_parameters,
            color: schema.category.color().to_string(),
            rule: Some(schema.rule),
        }
    }

    /// Definition driven by `{{name}}` placeholders in `template`. If
    /// `element_type` has a registered rule, the rule still takes over.
    pub fn custom(
        name: impl Into<String>,
        category: Category,
        element_type: impl Into<String>,
        template: impl Into<String>,
        default_parameters: Parameters,
    ) -> Self {
        let element_type = element_type.into();
        let rule = schema_for(&element_type).map(|s| s.rule);
        BlockDefinition {
            name: name.into(),
            category,
            element_type,
            default_template: template.into(),
            default_parameters,
            color: category.color().to_string(),
            rule,
        }
    }

    pub fn has_rule(&self) -> bool {
        self.rule.is_some()
    }

    pub fn instantiate(&self) -> BlockInstance {
        BlockInstance::instantiate(self)
    }
}

/// A placed, independently editable copy of a block definition.
///
/// Instances own their template and value map outright; `duplicate` is a
/// deep copy and never shares state with the original.
#[derive(Debug, Clone)]
pub struct BlockInstance {
    pub name: String,
    pub element_type: String,
    pub category: Category,
    template: String,
    parameters: Parameters,
    rule: Option<GenerationRule>,
}

impl BlockInstance {
    pub fn instantiate(definition: &BlockDefinition) -> Self {
        BlockInstance {
            name: definition.name.clone(),
            element_type: definition.element_type.clone(),
            category: definition.category,
            template: definition.default_template.clone(),
            parameters: definition.default_parameters.clone(),
            rule: definition.rule,
        }
    }

    pub fn template(&self) -> &str {
        &self.template
    }

    pub fn parameters(&self) -> &Parameters {
        &self.parameters
    }

    pub fn parameter(&self, name: &str) -> Option<&ParamValue> {
        self.parameters.get(name)
    }

    pub fn schema(&self) -> Option<&'static ElementSchema> {
        schema_for(&self.element_type)
    }

    /// Store a value for an existing parameter. No type coercion happens
    /// here; see `set_parameter_checked`.
    pub fn set_parameter(
        &mut self,
        name: &str,
        value: impl Into<ParamValue>,
    ) -> Result<(), BlockError> {
        match self.parameters.get_mut(name) {
            Some(slot) => {
                *slot = value.into();
                Ok(())
            }
            None => Err(BlockError::UnknownParameter {
                block: self.name.clone(),
                name: name.to_string(),
            }),
        }
    }

    /// Normalize `value` through the element's schema, when it has one,
    /// then store it.
    pub fn set_parameter_checked(
        &mut self,
        name: &str,
        value: impl Into<ParamValue>,
    ) -> Result<(), BlockError> {
        let value = value.into();
        let value = match self.schema() {
            Some(schema) if schema.param(name).is_some() => schema.normalize(name, value)?,
            _ => value,
        };
        self.set_parameter(name, value)
    }

    /// Render the fragment, or report that nothing could be generated.
    ///
    /// With a generation rule the whole template is recomputed from the
    /// current parameters. Without one, `{{name}}` placeholders in the stored
    /// template are substituted and the template itself is kept.
    pub fn try_render(&mut self) -> Result<String, BlockError> {
        if let Some(rule) = self.rule {
            self.template = rule(&Args::new(&self.parameters));
            return Ok(self.template.clone());
        }
        if has_placeholders(&self.template, &self.parameters) {
            Ok(substitute_placeholders(&self.template, &self.parameters))
        } else {
            Err(BlockError::UnsupportedElementType(self.element_type.clone()))
        }
    }

    /// Render the fragment, falling back to the stored template unchanged.
    pub fn render(&mut self) -> String {
        match self.try_render() {
            Ok(fragment) => fragment,
            Err(err) => {
                tracing::warn!(block = %self.name, "{err}; using template as-is");
                self.template.clone()
            }
        }
    }

    pub fn duplicate(&self) -> Self {
        BlockInstance {
            name: self.name.clone(),
            element_type: self.element_type.clone(),
            category: self.category,
            template: self.template.clone(),
            parameters: self.parameters.clone(),
            rule: self.rule,
        }
    }
}
