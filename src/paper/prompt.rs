//! @acp:module "Generation Prompts"
//! @acp:summary "Builds content-service prompts from structured parameters"
//! @acp:domain papers
//! @acp:layer logic

use super::PaperConfig;

/// Prompt for a full question paper.
///
/// The layout instructions match what the classifier expects: upper-case
/// section titles and questions numbered `N.` at the start of the line.
pub fn paper_prompt(config: &PaperConfig) -> String {
    let mut prompt = String::new();

    prompt.push_str(&format!(
        "You are an experienced examiner. Write a {} question paper for {}.\n\n",
        config.difficulty.to_string().to_lowercase(),
        config.institution.trim()
    ));
    prompt.push_str(&format!("Title: {}\n", config.title.trim()));
    prompt.push_str(&format!("Grade: {}\n", config.grade.trim()));
    prompt.push_str(&format!("Medium of instruction: {}\n", config.medium.trim()));
    prompt.push_str(&format!("Subject: {}\n", config.subject.trim()));
    prompt.push_str(&format!("Topics: {}\n", config.topics.trim()));
    prompt.push_str(&format!("Total marks: {}\n\n", config.total_marks()));

    prompt.push_str("Question breakdown:\n");
    for spec in config.question_types() {
        prompt.push_str(&format!(
            "- {}: {} questions, {} marks each ({} marks)\n",
            spec.kind,
            spec.count,
            spec.marks,
            spec.total()
        ));
    }

    prompt.push_str(
        "\nFormatting rules:\n\
         - Start every section with its title in UPPER CASE on its own line.\n\
         - Number questions continuously as \"1.\", \"2.\", ... at the start of the line.\n\
         - Put multiple-choice options on separate lines below the question.\n\
         - Use plain text only. No markdown, no asterisks, no answer key.\n",
    );

    prompt
}

/// Prompt for a multiple-choice quiz built from lesson notes
pub fn quiz_prompt(notes: &str, question_count: u32) -> String {
    format!(
        "Create a multiple-choice quiz with exactly {} questions from the notes below. \
         Each question must have four options and exactly one correct answer, which must \
         be one of the options verbatim. Respond with JSON only, shaped as \
         {{\"title\": string, \"questions\": [{{\"question\": string, \"options\": [string], \
         \"correctAnswer\": string}}]}}.\n\nNotes:\n{}",
        question_count,
        notes.trim()
    )
}

/// Instructions sent with an answer-sheet image for grading
pub fn evaluation_prompt(instructions: &str) -> String {
    let instructions = instructions.trim();
    let extra = if instructions.is_empty() {
        "Grade fairly against standard marking practice."
    } else {
        instructions
    };
    format!(
        "You are grading a student's handwritten answer sheet shown in the image. \
         For each answer give the marks awarded, a short justification and one \
         improvement tip, then a total score.\n\nTeacher instructions: {}",
        extra
    )
}
