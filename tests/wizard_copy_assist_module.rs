use bizsite::ai::{AiError, ChatMessage, GeneratedCopy, TextGenerator};
use bizsite::wizard::{
    merge_generated_copy, CopyAssistClient, CopyAssistError, CopyAssistRequest, WizardField,
    WizardState,
};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

struct FakeGenerator {
    calls: AtomicUsize,
    reply: Result<String, String>,
    last_messages: Mutex<Vec<ChatMessage>>,
}

impl FakeGenerator {
    fn replying(reply: &str) -> Self {
        Self {
            calls: AtomicUsize::new(0),
            reply: Ok(reply.to_string()),
            last_messages: Mutex::new(Vec::new()),
        }
    }

    fn failing(message: &str) -> Self {
        Self {
            calls: AtomicUsize::new(0),
            reply: Err(message.to_string()),
            last_messages: Mutex::new(Vec::new()),
        }
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl TextGenerator for FakeGenerator {
    fn generate_text(&self, messages: &[ChatMessage], _max_tokens: u32) -> Result<String, AiError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_messages.lock().expect("lock") = messages.to_vec();
        self.reply.clone().map_err(AiError::Request)
    }
}

fn request(description: &str) -> CopyAssistRequest {
    CopyAssistRequest {
        business_description: description.to_string(),
        industry: Some("restaurant".to_string()),
        business_name: Some("Crumb".to_string()),
    }
}

const GOOD_REPLY: &str = r#"Here is your copy:
{"tagline":"Bread worth waking up for","heroHeadline":"Fresh sourdough daily","heroSubheadline":"Baked at dawn.","services":[{"title":"Loaves","description":"Naturally leavened."}],"seoDescription":"Neighbourhood bakery."}
Enjoy!"#;

#[test]
fn copy_assist_module_short_description_never_calls_generator() {
    let generator = FakeGenerator::replying(GOOD_REPLY);
    let client = CopyAssistClient::new(&generator);

    let err = client.generate(&request("123456789")).expect_err("nine chars");
    assert!(matches!(err, CopyAssistError::DescriptionTooShort));
    assert_eq!(err.status_code(), 400);
    assert_eq!(generator.calls(), 0);

    client.generate(&request("1234567890")).expect("ten chars");
    assert_eq!(generator.calls(), 1);
}

#[test]
fn copy_assist_module_whitespace_does_not_count() {
    let generator = FakeGenerator::replying(GOOD_REPLY);
    let client = CopyAssistClient::new(&generator);
    let err = client
        .generate(&request("   short    "))
        .expect_err("padded description");
    assert!(matches!(err, CopyAssistError::DescriptionTooShort));
    assert_eq!(generator.calls(), 0);
}

#[test]
fn copy_assist_module_parses_object_from_prose() {
    let generator = FakeGenerator::replying(GOOD_REPLY);
    let copy = CopyAssistClient::new(&generator)
        .generate(&request("We bake sourdough every morning"))
        .expect("generate");
    assert_eq!(copy.tagline, "Bread worth waking up for");
    assert_eq!(copy.hero_headline, "Fresh sourdough daily");
    assert_eq!(copy.services.len(), 1);

    let messages = generator.last_messages.lock().expect("lock").clone();
    assert_eq!(messages[0].role, "system");
    assert!(messages[1].content.contains("Business Name: Crumb"));
    assert!(messages[1].content.contains("Industry: restaurant"));
}

#[test]
fn copy_assist_module_reply_without_object_is_parse_error() {
    let generator = FakeGenerator::replying("Sorry, I cannot help with that.");
    let err = CopyAssistClient::new(&generator)
        .generate(&request("We bake sourdough every morning"))
        .expect_err("no json");
    assert!(matches!(err, CopyAssistError::Parse { .. }));
    assert_eq!(err.status_code(), 500);
    assert_eq!(err.to_string(), "Failed to parse AI response. Please try again.");
}

#[test]
fn copy_assist_module_generator_failure_maps_to_generation_error() {
    let generator = FakeGenerator::failing("connection refused");
    let err = CopyAssistClient::new(&generator)
        .generate(&request("We bake sourdough every morning"))
        .expect_err("upstream down");
    assert!(matches!(err, CopyAssistError::Generation(_)));
    assert_eq!(err.to_string(), "Failed to generate content. Please try again.");
    assert!(err.detail().contains("connection refused"));
}

#[test]
fn copy_assist_module_merges_only_tagline() {
    let state = WizardState::default()
        .with_field(WizardField::BusinessName, "Crumb")
        .with_field(WizardField::Tagline, "Old tagline")
        .with_field(WizardField::Description, "We bake sourdough");
    let copy = GeneratedCopy {
        tagline: "New tagline".to_string(),
        hero_headline: "Ignored".to_string(),
        ..GeneratedCopy::default()
    };

    let merged = merge_generated_copy(&state, &copy);
    assert_eq!(merged.tagline, "New tagline");
    assert_eq!(merged.business_name, state.business_name);
    assert_eq!(merged.description, state.description);

    let kept = merge_generated_copy(&state, &GeneratedCopy::default());
    assert_eq!(kept.tagline, "Old tagline");
}

#[test]
fn copy_assist_module_request_from_state_drops_blank_context() {
    let state = WizardState::default().with_field(WizardField::Description, "We bake sourdough");
    let request = CopyAssistRequest::from_state(&state);
    assert_eq!(request.business_description, "We bake sourdough");
    assert_eq!(request.industry, None);
    assert_eq!(request.business_name, None);
}
