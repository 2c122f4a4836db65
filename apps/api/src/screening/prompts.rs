// All LLM prompt templates for screening.
// Reuses the recruiter persona from llm_client::prompts.

/// Descriptor generation template. Replace `{role}`, `{skills}` and `{profile}` before sending.
pub const DESCRIPTOR_PROMPT_TEMPLATE: &str = "Con base en estas respuestas, genera un descriptor profesional del cargo:

1. ¿Qué tipo de cargo buscas?: {role}
2. ¿Qué conocimientos técnicos o habilidades necesita?: {skills}
3. ¿Qué perfil humano o experiencia previa es deseable?: {profile}

Redáctalo de forma clara y profesional.";

/// CV analysis template, numeric scale. Replace `{descriptor}` and `{cv_text}`.
///
/// The closing label is what `affinity::find_numeric_score` keys on.
pub const ANALYSIS_NUMERIC_TEMPLATE: &str = "Analiza el siguiente CV en base al descriptor de cargo.

Descriptor del cargo:
{descriptor}

Currículum del candidato:
{cv_text}

Entregar análisis en este formato:
Fortalezas:
-
Debilidades:
-
Nota de afinidad con el cargo (de 1 a 100):";

/// CV analysis template, categorical scale. Replace `{descriptor}` and `{cv_text}`.
///
/// The closing label and the five options are what `affinity::extract_category` keys on.
pub const ANALYSIS_CATEGORICAL_TEMPLATE: &str = "Analiza el siguiente CV en base al descriptor de cargo.

Descriptor del cargo:
{descriptor}

Currículum del candidato:
{cv_text}

Entregar análisis en este formato:
Fortalezas:
-
Debilidades:
-
Nota de Afinidad al Cargo: (responde solo una opción: Muy Alta, Alta, Media, Baja o Muy Baja)

No uses las palabras de la escala fuera de la línea de Nota de Afinidad.";
