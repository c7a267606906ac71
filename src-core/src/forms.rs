//! Form input validation
//!
//! Raw text from the view layer's forms is checked and normalized here
//! before any operation is called.

use crate::domain::{DomainError, DomainResult, Item, ItemDraft};
use crate::error::AuthError;

pub const MIN_PASSWORD_LEN: usize = 6;

/// Price field text to a non-negative amount; anything unparsable is zero
pub fn parse_price(input: &str) -> f64 {
    input
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|price| price.is_finite() && *price >= 0.0)
        .unwrap_or(0.0)
}

/// Trimmed, non-empty text
pub fn required_text(field: &str, input: &str) -> DomainResult<String> {
    let value = input.trim();
    if value.is_empty() {
        return Err(DomainError::Required(field.to_string()));
    }
    Ok(value.to_string())
}

/// Portuguese message shown next to a form for a validation error
pub fn form_error_text(error: &DomainError) -> String {
    match error {
        DomainError::Required(field) => match field.as_str() {
            "name" => "Informe o nome do produto.",
            "category" => "Selecione uma categoria.",
            "message" => "Digite uma mensagem.",
            _ => "Preencha os campos obrigatórios.",
        }
        .to_string(),
    }
}

fn optional_text(input: &str) -> Option<String> {
    let value = input.trim();
    (!value.is_empty()).then(|| value.to_string())
}

/// Raw contents of the item form
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ItemForm {
    pub name: String,
    pub price: String,
    pub category_id: String,
    pub photo_url: String,
    pub product_url: String,
    pub notes: String,
}

impl ItemForm {
    /// Form prefilled from an existing item, for editing
    pub fn from_item(item: &Item) -> Self {
        Self {
            name: item.name.clone(),
            price: format!("{:.2}", item.price),
            category_id: item.category_id.clone(),
            photo_url: item.photo_url.clone().unwrap_or_default(),
            product_url: item.product_url.clone().unwrap_or_default(),
            notes: item.notes.clone().unwrap_or_default(),
        }
    }

    pub fn validate(&self) -> DomainResult<ItemDraft> {
        Ok(ItemDraft {
            name: required_text("name", &self.name)?,
            price: parse_price(&self.price),
            category_id: required_text("category", &self.category_id)?,
            photo_url: optional_text(&self.photo_url),
            product_url: optional_text(&self.product_url),
            notes: optional_text(&self.notes),
        })
    }
}

/// Sign-up checks, with the messages shown to the user
pub fn validate_registration(password: &str, confirmation: &str) -> Result<(), String> {
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err("A senha deve ter pelo menos 6 caracteres.".to_string());
    }
    if password != confirmation {
        return Err("As senhas não conferem.".to_string());
    }
    Ok(())
}

/// Text shown for a failed auth call: the backend's message, or `fallback`
pub fn auth_error_text(error: &AuthError, fallback: &str) -> String {
    let message = error.message.trim();
    if message.is_empty() {
        fallback.to_string()
    } else {
        message.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(name: &str, price: &str, category_id: &str) -> ItemForm {
        ItemForm {
            name: name.to_string(),
            price: price.to_string(),
            category_id: category_id.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_blank_price_is_zero() {
        let draft = form("Arroz", "", "c1").validate().unwrap();
        assert_eq!(draft.price, 0.0);
    }

    #[test]
    fn test_price_parsing() {
        assert_eq!(parse_price(" 12.5 "), 12.5);
        assert_eq!(parse_price("abc"), 0.0);
        assert_eq!(parse_price("-3"), 0.0);
        assert_eq!(parse_price("NaN"), 0.0);
    }

    #[test]
    fn test_name_and_category_required() {
        assert!(matches!(
            form("   ", "1", "c1").validate(),
            Err(DomainError::Required(field)) if field == "name"
        ));
        assert!(form("Arroz", "1", "").validate().is_err());
    }

    #[test]
    fn test_form_errors_in_portuguese() {
        let missing_name = form("", "1", "c1").validate().unwrap_err();
        assert_eq!(form_error_text(&missing_name), "Informe o nome do produto.");
        let missing_category = form("Arroz", "1", " ").validate().unwrap_err();
        assert_eq!(form_error_text(&missing_category), "Selecione uma categoria.");
        assert_eq!(
            form_error_text(&DomainError::Required("other".to_string())),
            "Preencha os campos obrigatórios."
        );
    }

    #[test]
    fn test_optional_fields_trimmed() {
        let mut raw = form("  Café ", "9.9", "c1");
        raw.notes = "  ".to_string();
        raw.product_url = " https://loja.example/cafe ".to_string();
        let draft = raw.validate().unwrap();
        assert_eq!(draft.name, "Café");
        assert_eq!(draft.notes, None);
        assert_eq!(draft.product_url.as_deref(), Some("https://loja.example/cafe"));
    }

    #[test]
    fn test_edit_form_keeps_item_values() {
        let item = Item {
            id: "i1".to_string(),
            name: "Leite".to_string(),
            price: 4.5,
            category_id: "c1".to_string(),
            completed: false,
            owner_id: "a".to_string(),
            photo_url: None,
            product_url: None,
            notes: Some("integral".to_string()),
        };
        let draft = ItemForm::from_item(&item).validate().unwrap();
        assert_eq!(draft.name, "Leite");
        assert_eq!(draft.price, 4.5);
        assert_eq!(draft.notes.as_deref(), Some("integral"));
        assert_eq!(draft.photo_url, None);
    }

    #[test]
    fn test_auth_error_text() {
        let err = AuthError::new("Invalid login credentials");
        assert_eq!(auth_error_text(&err, "Erro"), "Invalid login credentials");
        assert_eq!(auth_error_text(&AuthError::new(""), "Erro"), "Erro");
    }

    #[test]
    fn test_registration_rules() {
        assert!(validate_registration("12345", "12345").is_err());
        assert_eq!(
            validate_registration("123456", "654321"),
            Err("As senhas não conferem.".to_string())
        );
        assert!(validate_registration("123456", "123456").is_ok());
    }
}
