// All LLM prompt constants for the Interview module, plus the fixed
// user-visible message templates the engine appends without a model call.
// Reuses cross-cutting fragments from llm_client::prompts.

/// System prompt for question set generation.
pub const QUESTION_GENERATION_SYSTEM: &str = "You are a technical interviewer \
    for a recruitment agency preparing a screening question set. \
    Respond with the numbered questions only — no preamble, no commentary.";

/// Question generation prompt template.
/// Replace: {experience}, {tech_stack}, {desired_positions}, {num_questions}
pub const QUESTION_GENERATION_PROMPT_TEMPLATE: &str = r#"The candidate has {experience} years of experience and is skilled in: {tech_stack}.
They are looking for positions as: {desired_positions}.

Generate exactly {num_questions} technical questions to assess their knowledge. The questions should:
1. Be of increasing difficulty (start easy, end challenging)
2. Cover different aspects of their tech stack
3. Include some practical scenario-based questions
4. Be clear and concise

Format each question as:
1. Question 1
2. Question 2
...and so on.

Only provide {num_questions} questions, nothing else."#;

/// Exit classification prompt template. Replace: {message}
pub const EXIT_CLASSIFIER_PROMPT_TEMPLATE: &str = r#"Analyze this candidate message and determine if they want to end the interview.
If yes, return ONLY the word 'exit'.
If no, return ONLY the word 'continue'.

Candidate message: "{message}""#;

/// Fresh-answer evaluation prompt template (context A).
/// Replace: {marker_instruction}, {name}, {experience}, {tech_stack},
///          {question}, {answer}
pub const ANSWER_EVALUATION_PROMPT_TEMPLATE: &str = r#"You are evaluating a candidate's answer in a technical screening interview.

Candidate: {name} with {experience} years of experience
Tech stack: {tech_stack}
Current question: {question}
Candidate response: {answer}

Based on this response, make ONE decision:
1. If the answer shows good understanding, acknowledge it positively and end your response with "COMPLETE_ANSWER"
2. If the answer is superficial or incomplete, acknowledge what they said, ask ONE specific follow-up question to probe deeper, and end your response with "NEEDS_FOLLOWUP"
3. If the answer is completely off-topic or incorrect, provide gentle correction and end your response with "NEEDS_FOLLOWUP"

{marker_instruction}"#;

/// Follow-up-reply evaluation prompt template (context B).
/// Replace: {marker_instruction}, {name}, {experience}, {tech_stack},
///          {question}, {answer}, {follow_up_count}, {max_follow_ups}
pub const FOLLOWUP_EVALUATION_PROMPT_TEMPLATE: &str = r#"You are evaluating a candidate's reply to a follow-up question in a technical screening interview.

Candidate: {name} with {experience} years of experience
Tech stack: {tech_stack}
Current technical topic: {question}
Follow-up response from candidate: {answer}
Current follow-up count: {follow_up_count} (max allowed: {max_follow_ups})

Based on this response:
1. Briefly acknowledge their answer (1-2 sentences)
2. Make ONE decision:
   a. If the candidate has now demonstrated sufficient knowledge on this topic, end your response with "MOVE_TO_NEXT_QUESTION"
   b. If the candidate still shows limited understanding AND the follow-up count is below the maximum, provide brief feedback, ask ONE further probing question, and end your response with "NEEDS_MORE_DEPTH"
   c. If the follow-up count has reached the maximum, end your response with "MOVE_TO_NEXT_QUESTION" regardless of answer quality

{marker_instruction}"#;

/// Transition-to-next-question prompt template. Replace: {question}
pub const TRANSITION_PROMPT_TEMPLATE: &str = r#"You are moving to the next question in a technical screening interview.

Create a natural transition that:
1. Briefly acknowledges we're moving to a new topic (1 sentence)
2. Presents the next question clearly, without numbering it explicitly (do NOT include "Question 2:" or similar)

The next question is: "{question}". If it starts with a number, rewrite it naturally without the number."#;

/// Interview conclusion prompt template. Replace: {name}, {tech_stack}
pub const CONCLUSION_PROMPT_TEMPLATE: &str = r#"You are concluding a technical screening interview.
The candidate ({name}) has completed all technical questions about {tech_stack}.

Provide a brief, positive conclusion that:
1. Thanks them for their time
2. Mentions that the recruitment team will review their responses
3. Gives them an idea of next steps (without making specific promises)
4. Ends professionally

Keep it under 4 sentences."#;

// ────────────────────────────────────────────────────────────────────────────
// Fixed user-visible messages (no model call)
// ────────────────────────────────────────────────────────────────────────────

/// Greeting appended when a session is created. Replace: {name}, {tech_stack}
pub const GREETING_TEMPLATE: &str = "Hello {name}! I'm your interviewer for today. \
    Based on your profile, I'll be asking you some technical questions related to \
    your skills in {tech_stack}. Let's begin!";

/// First-question lead-in. Replace: {question}
pub const FIRST_QUESTION_TEMPLATE: &str = "Let's start with the first question:\n\n{question}";

/// Closing appended when the candidate asks to exit.
pub const EXIT_CLOSING_MESSAGE: &str = "Thank you for your time! We'll review your \
    responses and get back to you soon. Have a great day!";

/// Appended when question generation fails; the session stays un-started.
pub const GENERATION_FAILURE_MESSAGE: &str = "I'm sorry — I wasn't able to prepare \
    your technical questions just now. Please start a new interview in a few minutes.";

/// Appended when a mid-turn model call fails; the turn is retried on the
/// candidate's next message. Replace: {tech_stack}
pub const TURN_FAILURE_TEMPLATE: &str = "I apologize — I ran into a problem processing \
    your response. Let's pick up where we left off: could you tell me more about your \
    experience with {tech_stack}?";
