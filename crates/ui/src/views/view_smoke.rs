use services::GatewayError;
use tutor_core::model::{AnalysisResult, PracticeQuestion, QuestionDraft, QuestionId, Step};

use super::test_harness::{sample_image, setup_view_harness};
use crate::vm::TutorIntent;

fn analysis() -> AnalysisResult {
    AnalysisResult {
        subject: "English".into(),
        core_concept: "过去完成时".into(),
        mistake_analysis: "你把 **had gone** 写成了 went。".into(),
        correct_solution: "By the time I arrived, she had gone.\n我到的时候，她已经走了。".into(),
        encouragement: "你已经很接近了，加油！".into(),
    }
}

fn questions() -> Vec<PracticeQuestion> {
    [(1, "had left"), (2, "had eaten")]
        .into_iter()
        .map(|(id, answer)| {
            QuestionDraft {
                id: QuestionId::new(id),
                question: format!("Question {id}: fill in the blank."),
                options: vec![
                    answer.to_string(),
                    "left".into(),
                    "has left".into(),
                    "leaves".into(),
                ],
                correct_answer: answer.to_string(),
                explanation: "先发生的动作用过去完成时。".into(),
            }
            .validate()
            .expect("valid question")
        })
        .collect()
}

#[tokio::test(flavor = "current_thread")]
async fn upload_screen_renders_on_start() {
    let mut harness = setup_view_harness();
    harness.rebuild();
    let html = harness.render();
    assert!(html.contains("错题"), "missing title in {html}");
    assert!(html.contains("点击拍照或上传图片"), "missing picker in {html}");
    assert!(html.contains("accept=\"image/*\""), "missing accept filter in {html}");
    assert_eq!(harness.session().step(), Step::Upload);
}

#[tokio::test(flavor = "current_thread")]
async fn analysis_result_renders_review() {
    let mut harness = setup_view_harness();
    harness.rebuild();
    harness.gateway.push_analysis(Ok(analysis()));

    harness.send(TutorIntent::SelectImage(sample_image())).await;

    let html = harness.render();
    assert_eq!(harness.session().step(), Step::Review);
    assert!(html.contains("核心知识点"), "missing concept heading in {html}");
    assert!(html.contains("过去完成时"), "missing concept in {html}");
    assert!(html.contains("<strong>had gone</strong>"), "markdown not rendered in {html}");
    assert!(html.contains("data:image/png;base64,"), "missing photo in {html}");
    assert!(html.contains("我学会了，去练习！"), "missing proceed in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn failed_analysis_shows_notice_on_upload() {
    let mut harness = setup_view_harness();
    harness.rebuild();
    harness
        .gateway
        .push_analysis(Err(GatewayError::MalformedResponse("missing field".into())));

    harness.send(TutorIntent::SelectImage(sample_image())).await;

    let html = harness.render();
    assert_eq!(harness.session().step(), Step::Upload);
    assert!(harness.session().image().is_none());
    assert!(html.contains("分析失败，请重试！"), "missing notice in {html}");
    assert!(html.contains("点击拍照或上传图片"), "not back on upload in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn quiz_then_result_flow() {
    let mut harness = setup_view_harness();
    harness.rebuild();
    harness.gateway.push_analysis(Ok(analysis()));
    harness.gateway.push_quiz(Ok(questions()));

    harness.send(TutorIntent::SelectImage(sample_image())).await;
    harness.send(TutorIntent::Proceed).await;

    let html = harness.render();
    assert_eq!(harness.session().step(), Step::Practice);
    assert!(html.contains("1 / 2"), "missing progress in {html}");
    assert!(html.contains("Question 1: fill in the blank."), "missing question in {html}");
    assert!(!html.contains("解析"), "explanation shown too early in {html}");

    harness.send(TutorIntent::SelectAnswer("left".into())).await;
    let html = harness.render();
    assert!(html.contains("quiz-option--wrong"), "missing wrong styling in {html}");
    assert!(html.contains("quiz-option--correct"), "missing correct styling in {html}");
    assert!(html.contains("先发生的动作用过去完成时。"), "missing explanation in {html}");
    assert!(html.contains("下一题"), "missing next in {html}");

    harness.send(TutorIntent::Advance).await;
    harness.send(TutorIntent::SelectAnswer("had eaten".into())).await;
    let html = harness.render();
    assert!(html.contains("查看结果"), "missing finish in {html}");

    harness.send(TutorIntent::Advance).await;
    let html = harness.render();
    assert_eq!(harness.session().step(), Step::Success);
    assert!(html.contains("挑战完成!"), "missing title in {html}");
    assert!(html.contains("50%"), "missing percent in {html}");
    assert!(html.contains("用时 0 秒"), "missing elapsed time in {html}");
    assert!(html.contains("再练一道错题"), "missing reset in {html}");

    harness.send(TutorIntent::Reset).await;
    let html = harness.render();
    assert_eq!(harness.session().step(), Step::Upload);
    assert!(html.contains("点击拍照或上传图片"), "not back on upload in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn failed_quiz_keeps_review_with_notice() {
    let mut harness = setup_view_harness();
    harness.rebuild();
    harness.gateway.push_analysis(Ok(analysis()));
    harness.gateway.push_quiz(Err(GatewayError::Timeout));

    harness.send(TutorIntent::SelectImage(sample_image())).await;
    harness.send(TutorIntent::Proceed).await;

    let html = harness.render();
    assert_eq!(harness.session().step(), Step::Review);
    assert!(html.contains("题目生成失败，请重试！"), "missing notice in {html}");
    assert!(html.contains("超时"), "missing timeout hint in {html}");
    assert!(html.contains("核心知识点"), "analysis lost in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn intents_for_other_steps_are_ignored() {
    let mut harness = setup_view_harness();
    harness.rebuild();

    harness.send(TutorIntent::Proceed).await;
    harness.send(TutorIntent::Advance).await;
    harness.send(TutorIntent::Reset).await;

    assert_eq!(harness.session().step(), Step::Upload);
    assert!(harness.gateway.calls().is_empty());
}
