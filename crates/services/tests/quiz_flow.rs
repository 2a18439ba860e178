use std::sync::Arc;

use tokio::sync::Mutex;

use quiz_core::model::{QuestionBank, Topic};
use quiz_core::time::fixed_clock;
use services::{QuizLoopService, SessionError};

fn load_bank() -> QuestionBank {
    serde_json::from_str(include_str!("fixtures/bank.json")).expect("fixture bank is valid")
}

#[test]
fn full_attempt_produces_expected_report() {
    let bank = load_bank();
    assert_eq!(bank.len(), 15);
    assert_eq!(bank.topics().len(), 4);

    let service = QuizLoopService::new(fixed_clock(), bank);
    let mut session = service.start_attempt("Ada").unwrap();

    // Answer the first 10 positions correctly and the last 5 incorrectly.
    for pos in 0..15 {
        session.go_to(pos).unwrap();
        let question = session.current_question();
        let correct = question.correct_option();
        let choice = if pos < 10 {
            correct
        } else {
            (correct + 1) % question.options().len()
        };
        session.select_answer(choice).unwrap();
    }

    for _ in 0..42 {
        session.tick();
    }

    let payload = service.finish_attempt(&mut session).unwrap();

    assert_eq!(payload.user_name, "Ada");
    assert_eq!(payload.correct_answers, 10);
    assert_eq!(payload.total_questions, 15);
    assert_eq!(payload.score, 67); // round(10/15 * 100)
    assert_eq!(payload.time_spent_seconds, 42);
    assert_eq!(payload.time_spent_display(), "0:42");
    assert_eq!(payload.questions.len(), 15);
    assert_eq!(payload.answers.len(), 15);

    // Topic totals cover every question; the configured PHP topic has none.
    let total: u32 = payload.topic_stats.values().map(|s| s.total).sum();
    assert_eq!(total, 15);
    let php = Topic::new("PHP").unwrap();
    assert_eq!(payload.topic_stats.get(&php).map(|s| s.total), Some(0));
    assert_eq!(payload.topic_percentage(&php), None);

    // Every review row agrees with how the position was answered.
    let review = payload.review();
    assert_eq!(review.iter().filter(|r| r.is_correct).count(), 10);

    // The frozen session rejects any further mutation.
    assert_eq!(session.select_answer(0), Err(SessionError::AlreadyCompleted));
    assert_eq!(session.go_to(0), Err(SessionError::AlreadyCompleted));
}

#[test]
fn partial_attempt_scores_unanswered_as_incorrect() {
    let service = QuizLoopService::new(fixed_clock(), load_bank());
    let mut session = service.start_attempt("Grace").unwrap();

    // Answer only the first 3 positions, correctly.
    for pos in 0..3 {
        session.go_to(pos).unwrap();
        let correct = session.current_question().correct_option();
        session.select_answer(correct).unwrap();
    }

    let payload = service.finish_attempt(&mut session).unwrap();
    assert_eq!(payload.correct_answers, 3);
    assert_eq!(payload.score, 20);
    assert_eq!(
        payload.answers.iter().filter(|a| a.is_answered()).count(),
        3
    );
}

#[tokio::test(start_paused = true)]
async fn ticker_drives_a_live_attempt() {
    let service = QuizLoopService::new(fixed_clock(), load_bank());
    let session = Arc::new(Mutex::new(service.start_attempt("Ada").unwrap()));
    let ticker = service.spawn_ticker(&session);

    tokio::time::sleep(std::time::Duration::from_millis(3_500)).await;

    let payload = {
        let mut guard = session.lock().await;
        guard.select_answer(0).unwrap();
        service.finish_attempt(&mut guard).unwrap()
    };
    assert_eq!(payload.time_spent_seconds, 3);

    // Once the session is complete the ticker winds down on its own and a
    // restart would simply drop it.
    tokio::time::sleep(std::time::Duration::from_secs(5)).await;
    assert_eq!(session.lock().await.elapsed_seconds(), 3);
    assert!(ticker.is_finished());

    let fresh = service.start_attempt("Ada").unwrap();
    assert_eq!(fresh.elapsed_seconds(), 0);
}
