//! Model metadata - context windows, pricing, and capabilities

/// Metadata about a specific model
#[derive(Debug, Clone, PartialEq)]
pub struct ModelInfo {
    /// Model identifier (e.g., "MiniMax-M2")
    pub name: String,
    /// Maximum output tokens per response
    pub max_tokens: u32,
    /// Maximum context window in tokens
    pub context_window: u32,
    pub supports_images: bool,
    pub supports_prompt_cache: bool,
    /// USD per million input tokens
    pub input_price: f64,
    /// USD per million output tokens
    pub output_price: f64,
    pub cache_writes_price: Option<f64>,
    pub cache_reads_price: Option<f64>,
    pub description: String,
}

impl ModelInfo {
    pub fn new(name: impl Into<String>, max_tokens: u32, context_window: u32) -> Self {
        Self {
            name: name.into(),
            max_tokens,
            context_window,
            supports_images: false,
            supports_prompt_cache: false,
            input_price: 0.0,
            output_price: 0.0,
            cache_writes_price: None,
            cache_reads_price: None,
            description: String::new(),
        }
    }

    pub fn with_prices(mut self, input: f64, output: f64) -> Self {
        self.input_price = input;
        self.output_price = output;
        self
    }

    pub fn with_prompt_cache(mut self, writes: f64, reads: f64) -> Self {
        self.supports_prompt_cache = true;
        self.cache_writes_price = Some(writes);
        self.cache_reads_price = Some(reads);
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}

/// Ordered catalog of known models, keyed by id
#[derive(Debug, Clone)]
pub struct ModelCatalog {
    models: Vec<ModelInfo>,
    default_model: String,
}

impl ModelCatalog {
    pub fn new(default_model: impl Into<String>) -> Self {
        Self {
            models: Vec::new(),
            default_model: default_model.into(),
        }
    }

    /// Register a model, replacing any entry with the same id
    pub fn register(&mut self, info: ModelInfo) {
        match self.models.iter_mut().find(|m| m.name == info.name) {
            Some(existing) => *existing = info,
            None => self.models.push(info),
        }
    }

    pub fn get(&self, model: &str) -> Option<&ModelInfo> {
        self.models.iter().find(|m| m.name == model)
    }

    pub fn contains(&self, model: &str) -> bool {
        self.get(model).is_some()
    }

    pub fn default_model(&self) -> &str {
        &self.default_model
    }

    /// Info for a model id, falling back to the default model's entry
    pub fn info_for(&self, model: &str) -> Option<&ModelInfo> {
        self.get(model).or_else(|| self.get(&self.default_model))
    }

    /// Model ids in catalog order
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.models.iter().map(|m| m.name.as_str())
    }

    pub fn len(&self) -> usize {
        self.models.len()
    }

    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }
}
