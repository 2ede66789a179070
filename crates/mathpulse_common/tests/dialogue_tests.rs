//! Behavioural tests for the fallback dialogue engine

use mathpulse_common::dialogue::content::body;
use mathpulse_common::dialogue::responder::gratitude_replies;
use mathpulse_common::dialogue::{
    decide, fallback_response, ContentKind, ConversationContext, Intent, OfferKind, Topic,
};
use mathpulse_common::{Message, Sender};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn rng() -> StdRng {
    StdRng::seed_from_u64(42)
}

#[test]
fn test_no_topic_uses_derivatives() {
    let history = vec![
        Message::user("hello there"),
        Message::assistant("Hi! What are we studying today?"),
    ];
    let decision = decide("show me an example", &history, &mut rng());
    assert_eq!(decision.context.current_topic, None);
    assert_eq!(decision.intent, Intent::WantExamples);
    assert_eq!(decision.response, body(Topic::Derivatives, ContentKind::Examples));
}

#[test]
fn test_last_mention_wins() {
    let history = vec![
        Message::user("I need help with limits"),
        Message::assistant("Sure, limits are fun."),
        Message::user("actually, integrals are harder"),
    ];
    let ctx = ConversationContext::build(&history, "ok");
    assert_eq!(ctx.current_topic, Some(Topic::Integrals));
    assert!(ctx.topics_discussed.contains(&Topic::Limits));
    assert!(ctx.topics_discussed.contains(&Topic::Integrals));
}

#[test]
fn test_same_message_tie_follows_table_order() {
    let ctx = ConversationContext::build(&[], "the integral of a quadratic");
    assert_eq!(ctx.current_topic, Some(Topic::Quadratic));
}

#[test]
fn test_yes_after_example_offer() {
    let history = vec![Message::assistant("Nice work! Would you like an example?")];
    let decision = decide("yes", &history, &mut rng());
    assert_eq!(decision.context.last_ai_offer, Some(OfferKind::Examples));
    assert_eq!(decision.intent, Intent::Affirmative);
    assert_eq!(decision.response, body(Topic::Derivatives, ContentKind::Examples));
}

#[test]
fn test_chain_rule_example_in_same_message() {
    let decision = decide("can you show me an example of the chain rule", &[], &mut rng());
    assert_eq!(decision.intent, Intent::WantExamples);
    assert_eq!(decision.context.current_topic, Some(Topic::ChainRule));
    assert_eq!(decision.response, body(Topic::ChainRule, ContentKind::Examples));
}

#[test]
fn test_long_message_is_new_question() {
    let message = "i am studying for my big exams soon";
    assert_eq!(message.chars().count(), 35);
    let decision = decide(message, &[], &mut rng());
    assert_eq!(decision.intent, Intent::NewQuestion);
}

#[test]
fn test_thanks_with_empty_history() {
    let replies = gratitude_replies(None);
    for seed in 0..20 {
        let decision = decide("thanks", &[], &mut StdRng::seed_from_u64(seed));
        assert_eq!(decision.intent, Intent::Gratitude);
        assert!(replies.contains(&decision.response));
    }
    assert!(replies.iter().all(|r| r.contains("math")));
}

#[test]
fn test_affirmative_needs_open_offer() {
    // no offer: falls through to the example rule
    let decision = decide("yes, can you show me an example", &[], &mut rng());
    assert_eq!(decision.intent, Intent::WantExamples);

    // practice offer open: the affirmative rule wins
    let history = vec![Message::assistant("Want me to give you a practice problem?")];
    let decision = decide("yes, can you show me an example", &history, &mut rng());
    assert_eq!(decision.intent, Intent::Affirmative);
    assert_eq!(decision.response, body(Topic::Derivatives, ContentKind::Practice));

    let decision = decide("ok", &[], &mut rng());
    assert_eq!(decision.intent, Intent::Unknown);
}

#[test]
fn test_steps_offer_gives_explanation() {
    let history = vec![
        Message::user("what is a limit"),
        Message::assistant("Would you like me to go through it one step at a time?"),
    ];
    let decision = decide("sure", &history, &mut rng());
    assert_eq!(decision.context.last_ai_offer, Some(OfferKind::Steps));
    assert_eq!(decision.response, body(Topic::Limits, ContentKind::Explanation));
}

#[test]
fn test_topic_without_content_falls_back() {
    let decision = decide("give me a logarithm practice problem", &[], &mut rng());
    assert_eq!(decision.context.current_topic, Some(Topic::Logarithms));
    assert_eq!(decision.response, body(Topic::Derivatives, ContentKind::Practice));
}

#[test]
fn test_deterministic_outside_gratitude() {
    let history = vec![
        Message::user("help with the unit circle please"),
        Message::assistant("Would you like me to explain the ratios?"),
    ];
    for message in ["yes", "i'm confused", "what about radians?", "hmm"] {
        assert_eq!(
            fallback_response(message, &history),
            fallback_response(message, &history)
        );
    }
}

#[test]
fn test_every_reachable_lookup_is_non_empty() {
    for topic in Topic::ALL {
        for kind in ContentKind::ALL {
            assert!(!body(topic, kind).trim().is_empty(), "{:?} {:?}", topic, kind);
        }
    }
}

#[test]
fn test_history_from_web_client() {
    let history: Vec<Message> = serde_json::from_str(
        r#"[{"id": "1", "sender": "user", "message": "derivatives please"},
            {"id": "2", "sender": "ai", "message": "Want me to explain it again?"}]"#,
    )
    .unwrap();
    assert_eq!(history[1].sender, Sender::Assistant);

    let decision = decide("yeah", &history, &mut rng());
    assert_eq!(decision.context.last_ai_offer, Some(OfferKind::Explanation));
    assert_eq!(decision.response, body(Topic::Derivatives, ContentKind::Explanation));
}

#[test]
fn test_keywords_match_inside_words() {
    // "retry" contains "try"
    let decision = decide("retry", &[], &mut rng());
    assert_eq!(decision.intent, Intent::WantPractice);
    assert_eq!(decision.response, body(Topic::Derivatives, ContentKind::Practice));

    // "business" contains "sine"
    let ctx = ConversationContext::build(&[Message::user("my business homework")], "hmm");
    assert_eq!(ctx.current_topic, Some(Topic::Trigonometry));
}

#[test]
fn test_affirmative_prefix_runs_into_word() {
    let history = vec![Message::assistant("Would you like an example?")];
    let decision = decide("yesss", &history, &mut rng());
    assert_eq!(decision.intent, Intent::Affirmative);
    assert_eq!(decision.response, body(Topic::Derivatives, ContentKind::Examples));
}

#[test]
fn test_substring_tie_follows_table_order() {
    // "algebraic" carries "algebra", a later row than derivatives
    let ctx = ConversationContext::build(&[], "derivative of an algebraic expression");
    assert_eq!(ctx.current_topic, Some(Topic::Algebra));
    assert!(ctx.topics_discussed.contains(&Topic::Derivatives));
}
