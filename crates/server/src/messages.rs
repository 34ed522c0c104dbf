//! Localized response message templates.
//!
//! The original deployment shipped these as an embedded resource read
//! through a static helper; here they are a plain configuration value built
//! once at startup and injected through server state. `$` marks the subject
//! placeholder in a template.

use serde::Deserialize;

/// Response message templates.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct Messages {
    pub not_found: String,
    pub not_accepted: String,
    pub incorrect_id_format: String,
    pub not_found_given_id: String,
    pub cant_update: String,
    pub cant_remove: String,
    pub cant_found_given_name: String,
    pub deleted_success: String,
    pub internal_error: String,
}

impl Default for Messages {
    fn default() -> Self {
        Self {
            not_found: "Não foi possível encontrar nenhum $ no banco de dados.".to_string(),
            not_accepted:
                "Não é permitido inserir $, pois já existe um $ cadastrado com esse nome."
                    .to_string(),
            incorrect_id_format:
                "O paramêtro Id está em formato incorreto. Deve ser hexadecimal com tamanho 24"
                    .to_string(),
            not_found_given_id: "Não foi possível encontrar nenhum $ associado com esse id."
                .to_string(),
            cant_update: "Não foi possível realizar a atualização seguindo os valores passados."
                .to_string(),
            cant_remove: "Não foi possível realizar a remoção seguindo os valores passados."
                .to_string(),
            cant_found_given_name: "Não foi possível encontrar nenhum $ associado com esse nome."
                .to_string(),
            deleted_success: "$ deletado com sucesso".to_string(),
            internal_error: "Internal Server Error. We're currently working to fix it."
                .to_string(),
        }
    }
}

/// Substitutes every `$` in `template` with `subject`.
pub fn fill(template: &str, subject: &str) -> String {
    template.replace('$', subject)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fill_replaces_every_placeholder() {
        let messages = Messages::default();
        let filled = fill(&messages.not_accepted, "estabelecimento");
        assert_eq!(
            filled,
            "Não é permitido inserir estabelecimento, pois já existe um estabelecimento cadastrado com esse nome."
        );
    }
}
