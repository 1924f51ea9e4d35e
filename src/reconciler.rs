//! Preset/custom input reconciliation
//!
//! A settings field whose value is either drawn from a known preset set or
//! typed freely. The canonical value lives in the configuration store; this
//! module only keeps the local input mode and the custom draft in sync with
//! it and forwards edits through a [`WriteThrough`] sink.

/// Selector value that switches a field into custom entry
pub const CUSTOM_SENTINEL: &str = "__custom_sentinel__";

/// Whether a field is showing a preset selection or free-text entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputMode {
    #[default]
    Preset,
    Custom,
}

impl InputMode {
    pub fn is_custom(&self) -> bool {
        matches!(self, InputMode::Custom)
    }
}

/// Ordered set of values a selector offers
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PresetSet {
    values: Vec<String>,
}

impl PresetSet {
    pub fn new<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut set = Self::default();
        for value in values {
            let value = value.into();
            if !set.contains(&value) {
                set.values.push(value);
            }
        }
        set
    }

    pub fn contains(&self, value: &str) -> bool {
        self.values.iter().any(|v| v == value)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.values.iter().map(|s| s.as_str())
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Receives every value the reconciler propagates to the store
pub trait WriteThrough {
    fn write_through(&mut self, value: &str);
}

impl<F: FnMut(&str)> WriteThrough for F {
    fn write_through(&mut self, value: &str) {
        self(value)
    }
}

/// Per-field behaviour of a reconciler
#[derive(Debug, Clone)]
pub struct ReconcilerConfig {
    /// Field name used in logs
    pub name: &'static str,
    pub presets: PresetSet,
    /// Value an empty canonical stands for (e.g. the default entrypoint)
    pub empty_fallback: Option<String>,
    /// Offer "" as an explicit "no selection" option in the selector
    pub none_option: bool,
    /// Write the draft when switching to custom even if it is empty
    pub write_empty_custom: bool,
}

/// Local mode/draft state for one preset-or-custom field
#[derive(Debug, Clone)]
pub struct ModeReconciler {
    config: ReconcilerConfig,
    mode: InputMode,
    draft: String,
    canonical: String,
}

impl ModeReconciler {
    /// Activate the field against the store's current value
    pub fn new(config: ReconcilerConfig, canonical: &str) -> Self {
        let mut reconciler = Self {
            config,
            mode: InputMode::Preset,
            draft: String::new(),
            canonical: String::new(),
        };
        reconciler.on_external_change(canonical);
        reconciler
    }

    /// Re-derive mode from a canonical value reported by the store
    pub fn on_external_change(&mut self, canonical: &str) {
        self.canonical = canonical.to_string();
        let value = self.effective_value().to_string();

        if value.is_empty() || self.config.presets.contains(&value) {
            self.mode = InputMode::Preset;
        } else {
            self.mode = InputMode::Custom;
            self.draft = value;
        }

        tracing::debug!(
            field = self.config.name,
            canonical,
            mode = ?self.mode,
            "reconciled external change"
        );
    }

    /// Apply a selector pick: a preset value or [`CUSTOM_SENTINEL`]
    pub fn on_preset_selector_change(&mut self, selection: &str, sink: &mut impl WriteThrough) {
        if selection == CUSTOM_SENTINEL {
            self.mode = InputMode::Custom;
            if !self.draft.is_empty() || self.config.write_empty_custom {
                let draft = self.draft.clone();
                self.propagate(&draft, sink);
            }
        } else {
            self.mode = InputMode::Preset;
            self.propagate(selection, sink);
        }

        tracing::debug!(field = self.config.name, selection, mode = ?self.mode, "selector changed");
    }

    /// Replace the custom draft and forward it verbatim
    pub fn on_draft_text_input(&mut self, text: &str, sink: &mut impl WriteThrough) {
        self.draft = text.to_string();
        self.propagate(text, sink);
    }

    fn propagate(&mut self, value: &str, sink: &mut impl WriteThrough) {
        self.canonical = value.to_string();
        sink.write_through(value);
    }

    fn effective_value(&self) -> &str {
        match &self.config.empty_fallback {
            Some(fallback) if self.canonical.is_empty() => fallback,
            _ => &self.canonical,
        }
    }

    pub fn mode(&self) -> InputMode {
        self.mode
    }

    pub fn is_custom(&self) -> bool {
        self.mode.is_custom()
    }

    pub fn draft(&self) -> &str {
        &self.draft
    }

    pub fn canonical(&self) -> &str {
        &self.canonical
    }

    /// Value the selector should display
    pub fn selector_value(&self) -> &str {
        match self.mode {
            InputMode::Custom => CUSTOM_SENTINEL,
            InputMode::Preset => self.effective_value(),
        }
    }

    /// Selector options in display order, ending with the custom sentinel
    pub fn options(&self) -> Vec<&str> {
        let mut options = Vec::with_capacity(self.config.presets.len() + 2);
        if self.config.none_option {
            options.push("");
        }
        options.extend(self.config.presets.iter());
        options.push(CUSTOM_SENTINEL);
        options
    }

    /// Option adjacent to the current selector value, wrapping around
    pub fn cycle_option(&self, forward: bool) -> String {
        let options = self.options();
        let current = options
            .iter()
            .position(|o| *o == self.selector_value())
            .unwrap_or(0);
        let next = if forward {
            (current + 1) % options.len()
        } else if current == 0 {
            options.len() - 1
        } else {
            current - 1
        };
        options[next].to_string()
    }
}
