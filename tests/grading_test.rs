use std::collections::HashMap;

use chrono::Utc;
use quizbank_backend::models::question::{Question, QuestionType};
use quizbank_backend::services::grading_service::GradingService;
use serde_json::{json, Value as JsonValue};
use uuid::Uuid;

fn question(question_type: QuestionType, points: i32, data: JsonValue) -> Question {
    Question {
        id: Uuid::new_v4(),
        quiz_bank_id: Uuid::new_v4(),
        title: "Question".to_string(),
        question_text: "text".to_string(),
        question_type,
        question_data: data,
        points,
        order_index: 0,
        created_at: Utc::now(),
    }
}

fn answer(map: &mut HashMap<String, JsonValue>, q: &Question, value: JsonValue) {
    map.insert(q.id.to_string(), value);
}

#[test]
fn grades_a_bank_spanning_every_question_type() {
    let single = question(
        QuestionType::SingleChoice,
        5,
        json!({"options": ["2", "3", "4"], "correct_answer": "4"}),
    );
    let multi = question(
        QuestionType::MultipleChoice,
        3,
        json!({"options": ["x", "y", "z"], "correct_answers": ["x", "y"]}),
    );
    let fill = question(
        QuestionType::FillBlank,
        2,
        json!({"correct_answer": "Paris"}),
    );
    let dropdown = question(
        QuestionType::Dropdown,
        1,
        json!({"options": ["a", "b"], "correct_answer": "b"}),
    );
    let dropdown_fill = question(
        QuestionType::DropdownFillBlank,
        4,
        json!({"blanks": [{"correct_answer": "let"}, {"correct_answer": "mut"}]}),
    );
    let parsons = question(
        QuestionType::Parsons,
        6,
        json!({"slot_answers": {"1": "fn main() {", "2": "}"}}),
    );

    let mut answers = HashMap::new();
    answer(&mut answers, &single, json!("4"));
    answer(&mut answers, &multi, json!(["y", "x"]));
    answer(&mut answers, &fill, json!(" paris "));
    answer(&mut answers, &dropdown, json!("b"));
    answer(
        &mut answers,
        &dropdown_fill,
        json!({"blank_0": "let", "blank_1": "mut"}),
    );
    answer(
        &mut answers,
        &parsons,
        json!({"slot_answers": {"1": "fn main() {", "2": "}"}}),
    );

    let questions = vec![single, multi, fill, dropdown, dropdown_fill, parsons];
    let result = GradingService::grade(&questions, &answers);

    assert_eq!(result.score, 21);
    assert_eq!(result.total_points, 21);
    assert_eq!(result.percentage, 100.0);
}

#[test]
fn unanswered_questions_count_toward_total_but_not_score() {
    let q1 = question(
        QuestionType::SingleChoice,
        5,
        json!({"correct_answer": "4"}),
    );
    let q2 = question(
        QuestionType::FillBlank,
        5,
        json!({"correct_answer": "Paris"}),
    );
    let mut answers = HashMap::new();
    answer(&mut answers, &q1, json!("4"));

    let result = GradingService::grade(&[q1, q2], &answers);
    assert_eq!(result.score, 5);
    assert_eq!(result.total_points, 10);
    assert_eq!(result.percentage, 50.0);
}

#[test]
fn score_stays_within_bounds_for_arbitrary_answer_shapes() {
    let questions = vec![
        question(QuestionType::SingleChoice, 3, json!({"correct_answer": "a"})),
        question(
            QuestionType::MultipleChoice,
            3,
            json!({"correct_answers": ["a"]}),
        ),
        question(
            QuestionType::Parsons,
            3,
            json!({"correct_order": ["A", "B"]}),
        ),
    ];

    let shapes = vec![
        json!(null),
        json!(42),
        json!("garbage"),
        json!([1, 2, 3]),
        json!({"nested": {"deeply": true}}),
    ];

    for shape in shapes {
        let answers: HashMap<String, JsonValue> = questions
            .iter()
            .map(|q| (q.id.to_string(), shape.clone()))
            .collect();
        let result = GradingService::grade(&questions, &answers);
        assert!(result.score >= 0);
        assert!(result.score <= result.total_points);
        assert_eq!(result.total_points, 9);
    }
}

#[test]
fn answers_for_unknown_question_ids_are_ignored() {
    let q = question(
        QuestionType::SingleChoice,
        5,
        json!({"correct_answer": "4"}),
    );
    let mut answers = HashMap::new();
    answer(&mut answers, &q, json!("4"));
    answers.insert(Uuid::new_v4().to_string(), json!("4"));

    let result = GradingService::grade(&[q], &answers);
    assert_eq!(result.score, 5);
    assert_eq!(result.total_points, 5);
}

#[test]
fn percentage_rounds_half_up_at_two_decimals() {
    // 2 of 3 points is 66.666..., which must surface as 66.67.
    let q1 = question(
        QuestionType::SingleChoice,
        2,
        json!({"correct_answer": "a"}),
    );
    let q2 = question(
        QuestionType::SingleChoice,
        1,
        json!({"correct_answer": "b"}),
    );
    let mut answers = HashMap::new();
    answer(&mut answers, &q1, json!("a"));

    let result = GradingService::grade(&[q1, q2], &answers);
    assert_eq!(result.percentage, 66.67);
}

#[test]
fn code_answers_survive_editor_round_trips() {
    // The same snippet typed in a CRLF editor with trailing spaces and
    // doubled interior spaces still earns credit.
    let key = "for i in 0..10 {\n    println!(\"{}\", i);\n}";
    let submitted = "for i in 0..10 {  \r\n    println!(\"{}\",  i);\r\n}";
    let q = question(
        QuestionType::SingleChoice,
        5,
        json!({"correct_answer": key}),
    );
    let mut answers = HashMap::new();
    answer(&mut answers, &q, json!(submitted));

    let result = GradingService::grade(&[q], &answers);
    assert_eq!(result.score, 5);
}

#[test]
fn legacy_parsons_submissions_grade_in_any_wire_shape() {
    let key = json!({"correct_order": ["A", "B", "C"]});
    let shapes = vec![
        json!({"order": ["A", "B", "C"]}),
        json!({"slot_answers": {"1": "A", "2": "B", "3": "C"}}),
        json!({"1": "A", "2": "B", "3": "C"}),
        json!(["A", "B", "C"]),
    ];

    for shape in shapes {
        let q = question(QuestionType::Parsons, 4, key.clone());
        let mut answers = HashMap::new();
        answer(&mut answers, &q, shape.clone());
        let result = GradingService::grade(&[q], &answers);
        assert_eq!(result.score, 4, "shape {shape} should earn full credit");
    }
}

#[test]
fn submission_percentage_matches_engine_rounding() {
    use quizbank_backend::models::submission::Submission;

    let submission = Submission {
        id: Uuid::new_v4(),
        quiz_bank_id: Uuid::new_v4(),
        student_name: "Alice".to_string(),
        student_email: None,
        answers: json!({}),
        score: 1,
        total_points: 3,
        submitted_at: Utc::now(),
    };
    assert_eq!(submission.percentage(), 33.33);

    let empty = Submission {
        total_points: 0,
        score: 0,
        ..submission
    };
    assert_eq!(empty.percentage(), 0.0);
}
