use chrono::Local;

use crate::quiz::definition::Question;
use crate::quiz::Quiz;

const BANNER: &'static str = "-----------";
const TIMESTAMP_FORMAT: &'static str = "%m/%d/%Y %H:%M:%S";

pub fn timestamp() -> String {
    Local::now().format(TIMESTAMP_FORMAT).to_string()
}

fn render_questions(questions: &[Question], text: &mut String) {
    for (index, question) in questions.iter().enumerate() {
        text.push_str(&format!(
            "{}. {}\n {}\n {}\n {}\n",
            index + 1,
            question.reference(),
            question.question_type,
            question.prompt,
            question.answer
        ));
    }
}

fn render_body(quiz: &Quiz) -> String {
    let mut text = String::new();
    render_questions(&quiz.questions, &mut text);
    if !quiz.backup_questions.is_empty() {
        text.push_str("\nBackup Questions\n");
        render_questions(&quiz.backup_questions, &mut text);
    }
    text
}

pub fn render_text(title: &str, quiz: &Quiz) -> String {
    format!("{}\n{}\n{}\n{}", BANNER, title, BANNER, render_body(quiz))
}

fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

pub fn render_html(title: &str, quiz: &Quiz, timestamp: &str) -> String {
    let body = escape_html(&render_body(quiz)).replace('\n', "<br>");
    format!(
        "<html><head><title>{title}</title><style>
    h1 {{text-align: center;}}
    h3 {{text-align: right;}}
    p {{text-align: left;}}
    div {{text-align: center;}}
    </style>
    </head><body><h1>{title}</h1><h3>{timestamp}</h3>{body}</body></html>",
        title = escape_html(title),
        timestamp = timestamp,
        body = body
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quiz::definition::RawQuestion;

    fn question(id: usize, question_type: &str, reference: &str, prompt: &str) -> Question {
        RawQuestion {
            book: "Hebrews".to_owned(),
            question_type: question_type.to_owned(),
            reference: reference.to_owned(),
            prompt: prompt.to_owned(),
            answer: "answer".to_owned(),
        }
        .into_question(id)
        .unwrap()
    }

    fn quiz() -> Quiz {
        Quiz {
            questions: vec![
                question(0, "INT", "1:1", "Who spoke?"),
                question(1, "FTV", "3:16-18", "For who"),
            ],
            backup_questions: vec![question(2, "MA", "1:14; 2:1", "Name <two> things")],
            substitutions: vec![],
        }
    }

    #[test]
    fn renders_text_sections() {
        let text = render_text("Hebrews #1", &quiz());
        assert_eq!(
            text,
            "-----------\nHebrews #1\n-----------\n\
             1. Hebrews 1:1\n INT\n Who spoke?\n answer\n\
             2. Hebrews 3:16-18\n FTV\n For who\n answer\n\
             \nBackup Questions\n\
             1. Hebrews 1:14-2:1\n MA\n Name <two> things\n answer\n"
        );
    }

    #[test]
    fn omits_empty_backup_section() {
        let mut quiz = quiz();
        quiz.backup_questions.clear();
        assert!(!render_text("Hebrews #1", &quiz).contains("Backup Questions"));
    }

    #[test]
    fn renders_html_page() {
        let html = render_html("Hebrews #1", &quiz(), "10/18/2026 09:00:00");
        assert!(html.starts_with("<html>"));
        assert!(html.contains("<h1>Hebrews #1</h1>"));
        assert!(html.contains("<h3>10/18/2026 09:00:00</h3>"));
        assert!(html.contains("1. Hebrews 1:1<br> INT<br> Who spoke?<br> answer<br>"));
        assert!(html.contains("Name &lt;two&gt; things"));
        assert!(!html.contains("Who spoke?\n"));
    }

    #[test]
    fn rendering_is_repeatable() {
        let quiz = quiz();
        assert_eq!(render_text("Quiz", &quiz), render_text("Quiz", &quiz));
        assert_eq!(
            render_html("Quiz", &quiz, "01/01/2026 00:00:00"),
            render_html("Quiz", &quiz, "01/01/2026 00:00:00")
        );
    }
}
