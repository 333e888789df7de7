use serde::{Deserialize, Deserializer, Serialize};

/// Structured use-case record ("caso de uso") rendered as a table.
///
/// Every field is free text and defaults to empty; an all-empty record is valid.
/// A missing or `null` field reads as empty. Unknown keys are rejected so that
/// other object payloads are not mistaken for a use case.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct UseCase {
    #[serde(rename = "titulo", deserialize_with = "null_as_empty")]
    pub title: String,
    #[serde(rename = "modulo", deserialize_with = "null_as_empty")]
    pub module: String,
    #[serde(rename = "descricao", deserialize_with = "null_as_empty")]
    pub description: String,
    #[serde(rename = "atores", deserialize_with = "null_as_empty")]
    pub actors: String,
    #[serde(rename = "preCondicoes", deserialize_with = "null_as_empty")]
    pub preconditions: String,
    #[serde(rename = "fluxoPrincipal", deserialize_with = "null_as_empty")]
    pub main_flow: String,
    #[serde(rename = "fluxosAlternativos", deserialize_with = "null_as_empty")]
    pub alternate_flows: String,
    #[serde(rename = "fluxosExcecao", deserialize_with = "null_as_empty")]
    pub exception_flows: String,
    #[serde(rename = "posCondicoes", deserialize_with = "null_as_empty")]
    pub postconditions: String,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// Named field of a `UseCase`, in table order
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum UseCaseField {
    Title,
    Module,
    Description,
    Actors,
    Preconditions,
    MainFlow,
    AlternateFlows,
    ExceptionFlows,
    Postconditions,
}

impl UseCaseField {
    pub const ALL: [UseCaseField; 9] = [
        UseCaseField::Title,
        UseCaseField::Module,
        UseCaseField::Description,
        UseCaseField::Actors,
        UseCaseField::Preconditions,
        UseCaseField::MainFlow,
        UseCaseField::AlternateFlows,
        UseCaseField::ExceptionFlows,
        UseCaseField::Postconditions,
    ];

    /// Fields rendered as label/value rows below the header
    pub const DETAIL: [UseCaseField; 7] = [
        UseCaseField::Description,
        UseCaseField::Actors,
        UseCaseField::Preconditions,
        UseCaseField::MainFlow,
        UseCaseField::AlternateFlows,
        UseCaseField::ExceptionFlows,
        UseCaseField::Postconditions,
    ];

    /// Label printed in the exported document
    pub fn label(self) -> &'static str {
        match self {
            UseCaseField::Title => "Título",
            UseCaseField::Module => "Módulo",
            UseCaseField::Description => "Descrição",
            UseCaseField::Actors => "Atores",
            UseCaseField::Preconditions => "Pré-condições",
            UseCaseField::MainFlow => "Fluxo Principal",
            UseCaseField::AlternateFlows => "Fluxos Alternativos",
            UseCaseField::ExceptionFlows => "Fluxos de Exceção",
            UseCaseField::Postconditions => "Pós-condições",
        }
    }
}

impl UseCase {
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    pub fn field(&self, field: UseCaseField) -> &str {
        match field {
            UseCaseField::Title => &self.title,
            UseCaseField::Module => &self.module,
            UseCaseField::Description => &self.description,
            UseCaseField::Actors => &self.actors,
            UseCaseField::Preconditions => &self.preconditions,
            UseCaseField::MainFlow => &self.main_flow,
            UseCaseField::AlternateFlows => &self.alternate_flows,
            UseCaseField::ExceptionFlows => &self.exception_flows,
            UseCaseField::Postconditions => &self.postconditions,
        }
    }

    pub fn field_mut(&mut self, field: UseCaseField) -> &mut String {
        match field {
            UseCaseField::Title => &mut self.title,
            UseCaseField::Module => &mut self.module,
            UseCaseField::Description => &mut self.description,
            UseCaseField::Actors => &mut self.actors,
            UseCaseField::Preconditions => &mut self.preconditions,
            UseCaseField::MainFlow => &mut self.main_flow,
            UseCaseField::AlternateFlows => &mut self.alternate_flows,
            UseCaseField::ExceptionFlows => &mut self.exception_flows,
            UseCaseField::Postconditions => &mut self.postconditions,
        }
    }
}
