use crate::domain::model::Model;

/// An immutable named snapshot of the whole model, deep-copied at save time.
/// Restoring wholesale-replaces the live entities.
#[derive(Debug, Clone, PartialEq)]
pub struct Scenario {
    pub name: String,
    model: Model,
}

impl Scenario {
    pub fn capture(name: &str, model: &Model) -> Self {
        Self {
            name: name.to_string(),
            model: model.clone(),
        }
    }

    pub fn restore(&self) -> Model {
        self.model.clone()
    }
}
