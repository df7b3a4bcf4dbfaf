pub const DEFAULT_TEMPERATURE: f64 = 0.7;
pub const DEFAULT_TOP_K: u32 = 40;
pub const DEFAULT_TOP_P: f64 = 0.95;
pub const DEFAULT_MAX_OUTPUT_TOKENS: u32 = 1024;

/// Opening prompt of the interactive eco-story. The model is asked to answer in
/// the `Titre: ... | Situation: ... | Choix: a|b|c` format.
pub const STORY_START_PROMPT: &str = "Tu es un conteur d'histoires interactives sur le thème écologique.
Crée une histoire engageante avec EXACTEMENT ce format (respecte scrupuleusement les | et les séparateurs) :
Titre: [un titre accrocheur] | Situation: [une description de 100-150 mots de la situation écologique] |
Choix: [premier choix d'action]|[deuxième choix d'action]|[troisième choix d'action]

IMPORTANT: Tu dois absolument fournir exactement 3 choix séparés par des | sans espaces autour.";

#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct Part {
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct Content {
    pub parts: Vec<Part>,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    pub temperature: f64,
    pub top_k: u32,
    pub top_p: f64,
    pub max_output_tokens: u32,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            temperature: DEFAULT_TEMPERATURE,
            top_k: DEFAULT_TOP_K,
            top_p: DEFAULT_TOP_P,
            max_output_tokens: DEFAULT_MAX_OUTPUT_TOKENS,
        }
    }
}

#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct SafetySetting {
    pub category: String,
    pub threshold: String,
}

/// `generateContent` request body.
///
/// For reference, see: https://ai.google.dev/api/generate-content
///
/// ```rust
/// let request = gemini_probe::GenerateContent::new("Say hello.");
/// assert_eq!(request.prompt(), Some("Say hello."));
/// ```
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContent {
    pub contents: Vec<Content>,
    pub generation_config: GenerationConfig,
    // Only sent when set, the probe itself never sets any.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub safety_settings: Vec<SafetySetting>,
}

impl GenerateContent {
    pub fn new(prompt: &str) -> Self {
        Self {
            contents: vec![Content {
                parts: vec![Part {
                    text: prompt.to_string(),
                }],
            }],
            generation_config: GenerationConfig::default(),
            safety_settings: Vec::new(),
        }
    }

    /// Text of the first part of the first content, if any.
    pub fn prompt(&self) -> Option<&str> {
        self.contents
            .first()
            .and_then(|content| content.parts.first())
            .map(|part| part.text.as_str())
    }
}
