// Page state for the single-question UI and the submit handler that drives it.

use minijinja_autoreload::AutoReloader;
use serde::Deserialize;
use tracing::{info, warn};

use crate::constants;
use crate::llm_interaction::AnswerRequester;
use crate::{Answer, Question};

/// Form body posted by the page. `submit` is only present when the
/// button itself was pressed.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SubmitForm {
    #[serde(default)]
    pub question: String,
    pub submit: Option<String>,
}

/// What the output area shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Idle,
    Success(Answer),
    Failed(String),
}

impl Outcome {
    pub fn status(&self) -> &'static str {
        match self {
            Outcome::Idle => "idle",
            Outcome::Success(_) => "success",
            Outcome::Failed(_) => "error",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageView {
    /// Current contents of the input box.
    pub question: String,
    pub outcome: Outcome,
}

impl PageView {
    pub fn idle() -> Self {
        Self {
            question: String::new(),
            outcome: Outcome::Idle,
        }
    }

    pub fn answer(&self) -> Option<&Answer> {
        match &self.outcome {
            Outcome::Success(answer) => Some(answer),
            _ => None,
        }
    }

    pub fn error_message(&self) -> Option<&str> {
        match &self.outcome {
            Outcome::Failed(message) => Some(message),
            _ => None,
        }
    }

    pub fn render(&self, templates: &AutoReloader) -> Result<String, minijinja::Error> {
        let env = templates.acquire_env()?;
        let tmpl = env.get_template("index.html")?;
        tmpl.render(minijinja::context! {
            title => constants::PAGE_TITLE,
            heading => constants::PAGE_HEADING,
            description => constants::PAGE_DESCRIPTION,
            input_label => constants::INPUT_LABEL,
            button_label => constants::BUTTON_LABEL,
            waiting_message => constants::WAITING_MESSAGE,
            success_message => constants::SUCCESS_MESSAGE,
            question => &self.question,
            status => self.outcome.status(),
            answer => self.answer().map(Answer::as_str),
            error_message => self.error_message(),
        })
    }
}

/// Formats a failure the way the page shows it.
pub fn failure_message(err: &impl std::fmt::Display) -> String {
    format!("{}{}", constants::ERROR_PREFIX, err)
}

/// Runs one submission: Idle unless the button was pressed with a
/// non-blank question, otherwise exactly one call to the requester.
/// Failures become an error view; nothing from earlier submissions leaks in.
pub async fn handle_submission(requester: &AnswerRequester, form: SubmitForm) -> PageView {
    let SubmitForm { question: text, submit } = form;

    let question = match (submit, Question::new(text.clone())) {
        (Some(_), Some(question)) => question,
        _ => {
            info!("Ignoring submission without a question");
            return PageView {
                question: text,
                outcome: Outcome::Idle,
            };
        }
    };

    let outcome = match requester.request_answer(&question).await {
        Ok(answer) => Outcome::Success(answer),
        Err(e) => {
            warn!(error = %e, "Question could not be answered");
            Outcome::Failed(failure_message(&e))
        }
    };

    PageView {
        question: text,
        outcome,
    }
}
