use anon_core::{
    Backend, Choice, DownloadFormat, EntityStep, FinalOutput, Level, Mode, Phase, ReviewSession,
    SaveReceipt, SaveRequest,
};
use async_trait::async_trait;
use std::sync::Mutex;

/// In-memory stand-in for the anonymisation service. Detection returns a
/// fixed entity list; finalization applies choices with plain substring
/// replacement, skipping keep-original choices like the real server.
struct FakeBackend {
    steps: Vec<EntityStep>,
    saved: Mutex<Vec<SaveRequest>>,
}

impl FakeBackend {
    fn new(steps: Vec<EntityStep>) -> Self {
        Self {
            steps,
            saved: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl Backend for FakeBackend {
    async fn extract(&self, _file_name: &str, bytes: Vec<u8>) -> anyhow::Result<String> {
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }

    async fn detect(&self, _text: &str, _level: Level) -> anyhow::Result<Vec<EntityStep>> {
        Ok(self.steps.clone())
    }

    async fn finalize(
        &self,
        original_text: &str,
        choices: &[Choice],
    ) -> anyhow::Result<FinalOutput> {
        let mut highlighted = original_text.to_string();
        let mut clean = original_text.to_string();
        for choice in choices {
            if choice.is_keep_original() {
                continue;
            }
            for variant in &choice.original_list {
                highlighted =
                    highlighted.replace(variant, &format!("<mark>{}</mark>", choice.replacement));
                clean = clean.replace(variant, &choice.replacement);
            }
        }
        Ok(FinalOutput {
            anonymized_text_highlighted: highlighted,
            anonymized_text_clean: clean,
        })
    }

    async fn finalize_one_shot(
        &self,
        original_text: &str,
        _level: Level,
    ) -> anyhow::Result<FinalOutput> {
        Ok(FinalOutput {
            anonymized_text_highlighted: format!("<mark>{original_text}</mark>"),
            anonymized_text_clean: original_text.to_string(),
        })
    }

    async fn save(&self, report: &SaveRequest) -> anyhow::Result<SaveReceipt> {
        self.saved.lock().unwrap().push(report.clone());
        Ok(SaveReceipt {
            record_id: Some("1".to_string()),
            redirect_url: Some("/history".to_string()),
        })
    }

    fn download_url(&self, record_id: &str, format: DownloadFormat) -> String {
        format!("/download/{record_id}/{format}")
    }
}

fn person(name: &str, suggestions: &[&str]) -> EntityStep {
    EntityStep {
        display_text: name.to_string(),
        text_to_replace: vec![name.to_string()],
        label: "PERSON".to_string(),
        suggestions: suggestions.iter().map(|s| s.to_string()).collect(),
    }
}

#[tokio::test]
async fn stepwise_review_produces_expected_clean_output() {
    let backend = FakeBackend::new(vec![
        person("John", &["James", "Jim"]),
        person("Mary", &["Martha"]),
    ]);

    let mut session = ReviewSession::new();
    let epoch = session
        .start("John met Mary on July 1.", Level::Medium, Mode::Stepwise)
        .unwrap();

    let steps = backend
        .detect(session.input_text(), session.level())
        .await
        .unwrap();
    assert!(session.apply_detection(epoch, steps));
    assert_eq!(session.phase(), Phase::Reviewing);
    assert_eq!(session.progress(), (1, 2));

    session.set_replacement("Person A");
    session.next();
    session.set_replacement("Person B");
    assert!(session.is_last_step());

    let (epoch, original_text, choices) = session.begin_finalize().unwrap();
    let output = backend.finalize(&original_text, &choices).await.unwrap();
    assert!(session.apply_final(epoch, output));

    let output = session.output().unwrap();
    assert_eq!(
        output.anonymized_text_clean,
        "Person A met Person B on July 1."
    );
    assert_eq!(
        output.anonymized_text_highlighted,
        "<mark>Person A</mark> met <mark>Person B</mark> on July 1."
    );
}

#[tokio::test]
async fn all_keep_original_finalizes_to_original_text() {
    let backend = FakeBackend::new(vec![person("John", &[]), person("Mary", &[])]);

    let mut session = ReviewSession::new();
    let epoch = session
        .start("John met Mary on July 1.", Level::Medium, Mode::Stepwise)
        .unwrap();
    session.apply_detection(epoch, backend.steps.clone());

    let (epoch, original_text, choices) = session.begin_finalize().unwrap();
    let output = backend.finalize(&original_text, &choices).await.unwrap();
    session.apply_final(epoch, output);

    let output = session.output().unwrap();
    assert_eq!(output.anonymized_text_clean, "John met Mary on July 1.");
    assert_eq!(
        output.anonymized_text_highlighted,
        "John met Mary on July 1."
    );
}

#[tokio::test]
async fn zero_entity_detection_never_calls_finalize() {
    let backend = FakeBackend::new(Vec::new());

    let mut session = ReviewSession::new();
    let epoch = session
        .start("Nothing sensitive here.", Level::High, Mode::Stepwise)
        .unwrap();
    let steps = backend
        .detect(session.input_text(), session.level())
        .await
        .unwrap();
    session.apply_detection(epoch, steps);

    // Display reached directly; begin_finalize would be the only path to
    // a finalization request and it is rejected.
    assert_eq!(session.phase(), Phase::Displayed);
    assert!(session.begin_finalize().is_err());
    assert_eq!(
        session.output().unwrap().anonymized_text_clean,
        "Nothing sensitive here."
    );
}

#[tokio::test]
async fn save_sends_the_displayed_pair() {
    let backend = FakeBackend::new(vec![person("John", &[])]);

    let mut session = ReviewSession::new();
    let epoch = session
        .start("John was here.", Level::Low, Mode::Stepwise)
        .unwrap();
    session.apply_detection(epoch, backend.steps.clone());
    session.set_replacement("Someone");

    let (epoch, original_text, choices) = session.begin_finalize().unwrap();
    let output = backend.finalize(&original_text, &choices).await.unwrap();
    session.apply_final(epoch, output);

    let receipt = backend.save(&session.save_payload().unwrap()).await.unwrap();
    assert_eq!(receipt.record_id.as_deref(), Some("1"));
    assert_eq!(
        backend.download_url("1", DownloadFormat::Pdf),
        "/download/1/pdf"
    );

    let saved = backend.saved.lock().unwrap();
    assert_eq!(saved.len(), 1);
    assert_eq!(saved[0].original_text, "John was here.");
    assert_eq!(saved[0].anonymized_text_clean, "Someone was here.");
    assert_eq!(
        saved[0].anonymized_text_highlighted,
        "<mark>Someone</mark> was here."
    );
    assert_eq!(saved[0].model, Mode::Stepwise);
    assert_eq!(saved[0].level, Level::Low);
}

#[tokio::test]
async fn one_shot_mode_round_trip() {
    let backend = FakeBackend::new(Vec::new());

    let mut session = ReviewSession::new();
    let epoch = session
        .start("John met Mary.", Level::Medium, Mode::OneShot)
        .unwrap();
    let output = backend
        .finalize_one_shot(session.input_text(), session.level())
        .await
        .unwrap();
    assert!(session.apply_one_shot(epoch, output));
    assert_eq!(session.phase(), Phase::Displayed);
    assert!(session.can_save());
}

#[tokio::test]
async fn extraction_feeds_the_input_text() {
    let backend = FakeBackend::new(Vec::new());
    let text = backend
        .extract("report.txt", b"My name is John.".to_vec())
        .await
        .unwrap();
    assert_eq!(text, "My name is John.");

    let mut session = ReviewSession::new();
    assert!(session.start(&text, Level::Medium, Mode::Stepwise).is_ok());
    assert_eq!(session.input_text(), "My name is John.");
}
