//! Serializable analysis result.
//!
//! Field names on the wire are the Spanish keys consumed by the dashboard;
//! the Rust names describe the same values in English.

use std::collections::BTreeMap;

use chrono::NaiveDateTime;
use serde::Serialize;
use serde::ser::{SerializeMap, Serializer};

/// Spanish weekday names, Monday first.
pub const WEEKDAY_NAMES: [&str; 7] = [
    "Lunes",
    "Martes",
    "Miércoles",
    "Jueves",
    "Viernes",
    "Sábado",
    "Domingo",
];

/// Message counts for each hour of the day, serialized as `"00"`..`"23"`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HourCounts(pub [usize; 24]);

impl HourCounts {
    pub fn total(&self) -> usize {
        self.0.iter().sum()
    }
}

impl Serialize for HourCounts {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(24))?;
        for (hour, count) in self.0.iter().enumerate() {
            map.serialize_entry(&format!("{hour:02}"), count)?;
        }
        map.end()
    }
}

/// Message counts per weekday, serialized Monday first with Spanish names.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WeekdayCounts(pub [usize; 7]);

impl WeekdayCounts {
    pub fn total(&self) -> usize {
        self.0.iter().sum()
    }
}

impl Serialize for WeekdayCounts {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(7))?;
        for (name, count) in WEEKDAY_NAMES.iter().zip(self.0.iter()) {
            map.serialize_entry(name, count)?;
        }
        map.end()
    }
}

/// Most active participant.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TopPerson {
    #[serde(rename = "persona")]
    pub name: Option<String>,
    #[serde(rename = "cantidad")]
    pub count: usize,
}

/// Most active hour, as `"HH"`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TopHour {
    #[serde(rename = "hora")]
    pub hour: Option<String>,
    #[serde(rename = "cantidad")]
    pub count: usize,
}

/// Most active weekday, by Spanish name.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TopWeekday {
    #[serde(rename = "dia")]
    pub day: Option<String>,
    #[serde(rename = "cantidad")]
    pub count: usize,
}

/// First and last message of the transcript.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimeSpan {
    /// `dd-mm-YYYY HH:MM`
    #[serde(rename = "inicio")]
    pub start: String,
    #[serde(rename = "fin")]
    pub end: String,
    /// `"N days, H:MM:SS"`
    #[serde(rename = "duracion")]
    pub elapsed: String,
    #[serde(rename = "duracion_segundos")]
    pub elapsed_secs: i64,
    /// Calendar days from first to last message, both included
    #[serde(rename = "total_dias")]
    pub total_days: i64,
}

/// One segmented conversation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConversationSummary {
    #[serde(rename = "inicio")]
    pub start: NaiveDateTime,
    #[serde(rename = "fin")]
    pub end: NaiveDateTime,
    #[serde(rename = "duracion_segundos")]
    pub duration_secs: i64,
    #[serde(rename = "duracion")]
    pub duration: String,
    #[serde(rename = "iniciador")]
    pub initiator: Option<String>,
    #[serde(rename = "mensajes")]
    pub messages: usize,
}

/// Who opens conversations.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct InitiatorStats {
    #[serde(rename = "iniciadores")]
    pub counts: BTreeMap<String, usize>,
    /// `"xx.x%"` of all valid conversations
    #[serde(rename = "porcentajes")]
    pub percentages: BTreeMap<String, String>,
    #[serde(rename = "podio")]
    pub podium: Vec<(String, usize)>,
    #[serde(rename = "total_conversaciones")]
    pub total_conversations: usize,
}

/// Mean reply latency of one participant.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResponseTime {
    #[serde(rename = "promedio_segundos")]
    pub mean_secs: f64,
    #[serde(rename = "promedio_formateado")]
    pub mean_formatted: String,
    #[serde(rename = "total_respuestas")]
    pub samples: usize,
}

/// Longest run of active days.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct StreakSummary {
    #[serde(rename = "duracion_dias")]
    pub days: i64,
    /// `dd-mm-YYYY`
    #[serde(rename = "inicio")]
    pub start: Option<String>,
    #[serde(rename = "fin")]
    pub end: Option<String>,
}

/// Sentiment of one participant.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PersonSentiment {
    #[serde(rename = "promedio_compound")]
    pub mean_compound: f64,
    #[serde(rename = "positivos")]
    pub positive: usize,
    #[serde(rename = "neutrales")]
    pub neutral: usize,
    #[serde(rename = "negativos")]
    pub negative: usize,
    pub total: usize,
}

/// Sentiment over the whole transcript.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GlobalSentiment {
    /// Scoring engine, `"disabled"` when none ran
    pub engine: String,
    #[serde(rename = "promedio_compound")]
    pub mean_compound: f64,
    #[serde(rename = "positivos")]
    pub positive: usize,
    #[serde(rename = "neutrales")]
    pub neutral: usize,
    #[serde(rename = "negativos")]
    pub negative: usize,
    #[serde(rename = "mensajes_analizados")]
    pub scored: usize,
    /// Percent of all messages that received a score
    #[serde(rename = "cobertura")]
    pub coverage: f64,
}

/// Which optional capabilities produced this result.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NlpMetadata {
    /// Per language code, whether lemmas fed the cleaned word counts
    pub lemmatizer: BTreeMap<String, bool>,
    pub lemmatizer_provider: String,
    pub sentiment_engine: String,
    /// `"nlp"` or `"heuristic"`
    pub word_mode: String,
    /// An optional provider failed during this run
    pub degraded: bool,
}

/// Everything computed from one transcript.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisResult {
    #[serde(rename = "total_mensajes")]
    pub total_messages: usize,
    #[serde(rename = "participantes")]
    pub participants: Vec<String>,
    #[serde(rename = "mensajes_por_persona")]
    pub messages_per_person: BTreeMap<String, usize>,
    #[serde(rename = "persona_mas_activa")]
    pub most_active_person: TopPerson,

    /// Keyed by `YYYY-MM-DD`
    #[serde(rename = "mensajes_por_dia")]
    pub messages_per_day: BTreeMap<String, usize>,
    #[serde(rename = "mensajes_por_hora")]
    pub messages_per_hour: HourCounts,
    #[serde(rename = "mensajes_por_dia_semana")]
    pub messages_per_weekday: WeekdayCounts,
    #[serde(rename = "hora_mas_activa")]
    pub most_active_hour: TopHour,
    #[serde(rename = "dia_semana_mas_activo")]
    pub most_active_weekday: TopWeekday,
    #[serde(rename = "dias_activos")]
    pub active_days: usize,
    #[serde(rename = "mensajes_promedio_por_dia")]
    pub mean_messages_per_day: f64,
    #[serde(rename = "lapso_tiempo")]
    pub time_span: Option<TimeSpan>,

    #[serde(rename = "palabras_promedio_por_mensaje")]
    pub mean_words_per_message: f64,
    #[serde(rename = "palabras_promedio_por_persona")]
    pub mean_words_per_person: BTreeMap<String, f64>,
    #[serde(rename = "palabras_mas_utilizadas")]
    pub top_words: Vec<(String, usize)>,
    #[serde(rename = "palabras_mas_utilizadas_nlp")]
    pub top_words_cleaned: Vec<(String, usize)>,
    #[serde(rename = "total_multimedia")]
    pub media_count: usize,
    #[serde(rename = "total_links")]
    pub link_count: usize,

    #[serde(rename = "total_emojis")]
    pub emoji_count: usize,
    #[serde(rename = "emojis_mas_utilizados")]
    pub top_emojis: Vec<(String, usize)>,
    #[serde(rename = "emojis_por_persona")]
    pub top_emojis_per_person: BTreeMap<String, Vec<(String, usize)>>,

    #[serde(rename = "conversaciones")]
    pub conversations: Vec<ConversationSummary>,
    #[serde(rename = "tiempo_promedio_conversacion")]
    pub mean_conversation: String,
    #[serde(rename = "tiempo_promedio_conversacion_segundos")]
    pub mean_conversation_secs: f64,
    #[serde(rename = "iniciadores_de_conversacion")]
    pub initiators: InitiatorStats,
    #[serde(rename = "tiempo_respuesta_por_persona")]
    pub response_times: BTreeMap<String, ResponseTime>,
    #[serde(rename = "horas_totales_chat")]
    pub total_chat_hours: f64,

    #[serde(rename = "racha_conversacional")]
    pub streak: StreakSummary,

    #[serde(rename = "sentimiento_por_persona")]
    pub sentiment_per_person: BTreeMap<String, PersonSentiment>,
    /// Mean compound score keyed by `YYYY-MM-DD`
    #[serde(rename = "sentimiento_por_dia")]
    pub sentiment_per_day: BTreeMap<String, f64>,
    #[serde(rename = "sentimiento_global")]
    pub sentiment: GlobalSentiment,

    /// Messages per detected language code
    #[serde(rename = "idiomas_detectados")]
    pub languages: BTreeMap<String, usize>,
    #[serde(rename = "nlp_metadata")]
    pub nlp: NlpMetadata,
}
