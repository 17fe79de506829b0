//! Response schemas sent with each request so the endpoint answers in JSON of a fixed shape.

use serde_json::{Value, json};

/// OBJECT schema for `AnalysisResult`; all five fields required.
#[must_use]
pub fn analysis_schema(native_language: &str, foreign_language: &str) -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "subject": {
                "type": "STRING",
                "description": "The subject of the question (e.g., 'English', 'Math', 'Physics', 'Chinese')."
            },
            "mistakeAnalysis": {
                "type": "STRING",
                "description": format!(
                    "A friendly explanation of the mistake. If the subject is {foreign_language}, explain in {native_language} but quote {foreign_language} words or phrases from the image."
                )
            },
            "correctSolution": {
                "type": "STRING",
                "description": format!(
                    "Step-by-step correct solution. If the subject is {foreign_language}, give the {foreign_language} answer followed by its {native_language} translation."
                )
            },
            "coreConcept": {
                "type": "STRING",
                "description": format!(
                    "The main academic concept being tested (e.g., 'Pythagorean Theorem', 'Past Perfect Tense'). MUST BE IN {}.",
                    native_language.to_uppercase()
                )
            },
            "encouragement": {
                "type": "STRING",
                "description": format!(
                    "A short, enthusiastic message to cheer the student up. MUST BE IN {}.",
                    native_language.to_uppercase()
                )
            }
        },
        "required": ["subject", "mistakeAnalysis", "correctSolution", "coreConcept", "encouragement"],
        "propertyOrdering": ["subject", "coreConcept", "mistakeAnalysis", "correctSolution", "encouragement"]
    })
}

/// ARRAY schema for the practice questions.
#[must_use]
pub fn quiz_schema(native_language: &str) -> Value {
    json!({
        "type": "ARRAY",
        "items": {
            "type": "OBJECT",
            "properties": {
                "id": { "type": "INTEGER" },
                "question": {
                    "type": "STRING",
                    "description": "The practice question text."
                },
                "options": {
                    "type": "ARRAY",
                    "items": { "type": "STRING" },
                    "minItems": 4,
                    "maxItems": 4,
                    "description": "Four distinct multiple choice options."
                },
                "correctAnswer": {
                    "type": "STRING",
                    "description": "The correct option string, must exactly match one of the options."
                },
                "explanation": {
                    "type": "STRING",
                    "description": format!("Explanation of why the answer is correct (in {native_language}).")
                }
            },
            "required": ["id", "question", "options", "correctAnswer", "explanation"],
            "propertyOrdering": ["id", "question", "options", "correctAnswer", "explanation"]
        }
    })
}
