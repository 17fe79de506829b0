//! Instruction text for the two requests.

use tutor_core::model::LanguageProfile;

#[must_use]
pub fn analysis_prompt(language: &LanguageProfile) -> String {
    let native = language.native();
    let foreign = language.foreign();
    format!(
        "You are a friendly, encouraging middle school tutor.
Please analyze this image of a student's incorrect homework or exam question.

1. Identify the Subject (e.g. {foreign}, Math).
2. If you see handwriting, analyze the specific mistake.
3. Explain the error directly to the student (use \"you\"). Keep the tone lighthearted and supportive.

LANGUAGE RULES:
- If the subject is '{foreign}' (or the question is written in {foreign}):
   - 'correctSolution': MUST be bilingual. First show the correct {foreign} answer or sentence, then a new line with the {native} translation.
   - 'mistakeAnalysis': Explain in {native} (to explain grammar or vocabulary) but quote {foreign} parts naturally.
- If the subject is NOT '{foreign}':
   - Output 'correctSolution' and 'mistakeAnalysis' in {native}.
- 'coreConcept' and 'encouragement' must ALWAYS be in {native}.
"
    )
}

#[must_use]
pub fn quiz_prompt(
    language: &LanguageProfile,
    concept: &str,
    subject: &str,
    count: usize,
) -> String {
    let native = language.native();
    let foreign = language.foreign();
    if language.is_foreign_subject(subject) {
        format!(
            "The student made a mistake in the concept: \"{concept}\" (Subject: {foreign}).
Generate {count} multiple-choice practice questions to reinforce this {foreign} concept.
Number the questions with 'id' starting at 1. Give every question exactly 4 distinct options.

RULES:
1. The 'question', 'options' and 'correctAnswer' MUST be in {foreign}.
2. The 'explanation' MUST be in {native} (to help the student understand).
3. 'correctAnswer' MUST be copied exactly from one of the 'options'.
4. Make the questions suitable for a middle school level.
"
        )
    } else {
        format!(
            "Based on the concept: \"{concept}\" (Subject: {subject}), generate {count} similar multiple-choice practice questions for a middle school student.
The questions should help reinforce the correct understanding of the concept.
Number the questions with 'id' starting at 1. Give every question exactly 4 distinct options.

RULES:
1. All fields (question, options, correctAnswer, explanation) MUST be in {native}.
2. 'correctAnswer' MUST be copied exactly from one of the 'options'.
3. Make them fun or slightly creative!
"
        )
    }
}
