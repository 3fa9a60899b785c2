//! The offline, keyword-matched assistant.
//!
//! Always available and infallible: every input maps to one of a handful of
//! canned task-breakdown templates or guidance replies. This is also the
//! fallback whenever the remote backend is unconfigured or failing.

use super::{Assistant, AssistantError};

/// Stateless scripted responder.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScriptedAssistant;

impl Assistant for ScriptedAssistant {
    fn reply(&self, user_text: &str) -> Result<String, AssistantError> {
        let lower = user_text.trim().to_lowercase();
        Ok(respond(&lower))
    }
}

fn respond(lower: &str) -> String {
    if contains_any(lower, &["hello", "hi", "hey", "good morning", "good evening"]) {
        return GREETING.to_owned();
    }
    if contains_any(lower, &["help", "how do i use", "usage", "tutorial"]) {
        return HELP.to_owned();
    }
    if contains_any(lower, &["priority", "prioritize", "important", "urgent"]) {
        return PRIORITY.to_owned();
    }
    if contains_task_keywords(lower) {
        return breakdown(lower);
    }
    FALLBACK.to_owned()
}

fn contains_any(text: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|k| text.contains(k))
}

fn contains_task_keywords(text: &str) -> bool {
    contains_any(
        text,
        &[
            "finish", "complete", "write", "prepare", "organize", "study", "review", "plan",
            "project", "report", "paper", "essay", "assignment", "exam", "meeting",
            "presentation", "build",
        ],
    )
}

/// Pick the breakdown template closest to the described task.
fn breakdown(lower: &str) -> String {
    if contains_any(lower, &["report", "paper", "essay", "document", "write"]) {
        return DOCUMENT_BREAKDOWN.to_owned();
    }
    if contains_any(lower, &["exam", "study", "review", "revision"]) {
        return STUDY_BREAKDOWN.to_owned();
    }
    if contains_any(lower, &["project", "build", "develop", "launch"]) {
        return PROJECT_BREAKDOWN.to_owned();
    }
    GENERIC_BREAKDOWN.to_owned()
}

const GREETING: &str = "Hello! Tell me about a task you need to finish and I \
will help you break it down and plan it out.";

const HELP: &str = "I am your task planning assistant. You can:\n\
1. Describe a task and I will split it into steps\n\
2. Ask how to plan your time\n\
3. Ask for priority advice\n\n\
Try something like \"finish the project report\" or \"prepare for the exam\".";

const PRIORITY: &str = "A quick way to judge priority:\n\
1. Urgent and important: do it now\n\
2. Important, not urgent: schedule it\n\
3. Urgent, not important: delegate or timebox it\n\
4. Neither: consider dropping it\n\n\
Tell me the specific task and I can help you place it.";

const FALLBACK: &str = "I am not sure what you need. Describe the task you \
want to finish and I will do my best to break it down and plan it.";

const DOCUMENT_BREAKDOWN: &str = "Suggested breakdown for a writing task:\n\n\
1. Gather material (25%)\n   - Identify sources\n   - Collect references\n   - Note key data\n\n\
2. Outline (15%)\n   - Fix the structure\n   - List the main sections\n   - Allocate content\n\n\
3. Draft (40%)\n   - Write section by section\n   - Keep the thread coherent\n   - Lead with the key points\n\n\
4. Revise (20%)\n   - Fix grammar\n   - Tighten wording\n   - Clean up formatting\n\n\
Add these as sub-tasks to a plan and spread them over the time you have.";

const STUDY_BREAKDOWN: &str = "Suggested study plan:\n\n\
1. Map the material (20%)\n   - Scope what the exam covers\n   - List the hard parts\n   - Build a topic framework\n\n\
2. Systematic review (40%)\n   - Work topic by topic\n   - Take notes or mind-map\n   - Nail the core concepts\n\n\
3. Practice (25%)\n   - Do exercises\n   - Simulate the exam\n   - Analyze mistakes\n\n\
4. Close the gaps (15%)\n   - Revisit weak areas\n   - Memorize the essentials\n   - Rest before the day\n\n\
Anchor these against the exam date in your daily plans.";

const PROJECT_BREAKDOWN: &str = "Suggested project breakdown:\n\n\
1. Requirements (15%)\n   - Clarify the goal\n   - Pin down the scope\n   - Note constraints\n\n\
2. Design (20%)\n   - Plan the milestones\n   - Sketch the architecture\n   - Split responsibilities\n\n\
3. Build (45%)\n   - Core pieces first\n   - Integrate incrementally\n   - Test as you go\n\n\
4. Harden (15%)\n   - Full test pass\n   - Fix and polish\n   - Write things down\n\n\
5. Ship (5%)\n   - Final check\n   - Release\n\n\
Set milestones as deadlines in your week or month plans.";

const GENERIC_BREAKDOWN: &str = "A general way to split this:\n\n\
1. Prepare\n   - Clarify the goal and what done means\n   - Gather what you need\n   - Rough out a plan\n\n\
2. Execute\n   - Work highest priority first\n   - Check progress as you go\n   - Adjust when reality disagrees\n\n\
3. Wrap up\n   - Verify the result\n   - Confirm nothing is missing\n   - Note what you learned\n\n\
Add these as sub-tasks and adjust the split to fit the real task.";

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
