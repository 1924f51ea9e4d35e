//! Masked API key entry

use zeroize::Zeroizing;

/// Edit buffer for an API key. Cleared from memory on drop.
pub struct ApiKeyField {
    value: Zeroizing<String>,
    show_plain: bool,
}

impl ApiKeyField {
    pub fn new(initial: &str) -> Self {
        Self {
            value: Zeroizing::new(initial.to_string()),
            show_plain: false,
        }
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn set(&mut self, value: &str) {
        self.value = Zeroizing::new(value.to_string());
    }

    pub fn is_visible(&self) -> bool {
        self.show_plain
    }

    pub fn toggle_visibility(&mut self) {
        self.show_plain = !self.show_plain;
    }

    pub fn char_count(&self) -> usize {
        self.value.chars().count()
    }

    /// Text to show in the field: masked unless visibility is toggled on
    pub fn display(&self, mask_char: char) -> String {
        if self.show_plain {
            self.value.as_str().to_string()
        } else {
            std::iter::repeat(mask_char).take(self.char_count()).collect()
        }
    }
}

impl std::fmt::Debug for ApiKeyField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiKeyField")
            .field("value", &"[REDACTED]")
            .field("show_plain", &self.show_plain)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_masked_by_default() {
        let field = ApiKeyField::new("sk-abc");
        assert!(!field.is_visible());
        assert_eq!(field.display('•'), "••••••");
        assert_eq!(field.char_count(), 6);
    }

    #[test]
    fn test_toggle_visibility() {
        let mut field = ApiKeyField::new("sk-abc");
        field.toggle_visibility();
        assert_eq!(field.display('•'), "sk-abc");
        field.toggle_visibility();
        assert_eq!(field.display('*'), "******");
    }

    #[test]
    fn test_set_replaces_value() {
        let mut field = ApiKeyField::new("");
        field.set("new-key");
        assert_eq!(field.value(), "new-key");
    }

    #[test]
    fn test_debug_redacts() {
        let field = ApiKeyField::new("sk-secret");
        assert!(!format!("{:?}", field).contains("sk-secret"));
    }
}
