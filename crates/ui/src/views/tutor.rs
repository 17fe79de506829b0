use std::sync::Arc;

use dioxus::prelude::*;
use services::{Notice, WorkflowError, WorkflowOutcome};
use tracing::warn;

use crate::context::AppContext;
use crate::views::{
    ErrorScreen, Header, LoadingScreen, NoticeBanner, QuizScreen, ResultScreen, ReviewScreen,
    UploadScreen,
};
use crate::vm::{Screen, TutorIntent, map_screen};

#[cfg(test)]
use std::cell::RefCell;
#[cfg(test)]
use std::rc::Rc;
#[cfg(test)]
use tutor_core::model::Session;

fn report_completion(
    finished: Result<WorkflowOutcome, WorkflowError>,
    mut notice: Signal<Option<Notice>>,
) {
    match finished {
        Ok(outcome) => notice.set(outcome.notice().cloned()),
        Err(err) => warn!(error = %err, "completion rejected"),
    }
}

/// Owns the session for the lifetime of the window and renders its current step.
#[component]
pub fn TutorView() -> Element {
    let ctx = use_context::<AppContext>();
    let workflow = ctx.workflow();
    let session = use_signal({
        let workflow = Arc::clone(&workflow);
        move || workflow.new_session()
    });
    let mut notice = use_signal(|| None::<Notice>);

    let dispatch_intent = {
        let workflow = Arc::clone(&workflow);
        use_callback(move |intent: TutorIntent| {
            let mut session = session;
            let mut notice = notice;
            let kind = intent.kind();

            let rejected = match intent {
                TutorIntent::SelectImage(image) => {
                    let started = workflow.start_analysis(&mut session.write(), image);
                    match started {
                        Ok(ticket) => {
                            notice.set(None);
                            let workflow = Arc::clone(&workflow);
                            spawn(async move {
                                let completion = workflow.run_analysis(ticket).await;
                                let finished =
                                    workflow.finish_analysis(&mut session.write(), completion);
                                report_completion(finished, notice);
                            });
                            None
                        }
                        Err(err) => Some(err),
                    }
                }
                TutorIntent::Proceed => {
                    let started = workflow.start_quiz(&mut session.write());
                    match started {
                        Ok(ticket) => {
                            notice.set(None);
                            let workflow = Arc::clone(&workflow);
                            spawn(async move {
                                let completion = workflow.run_quiz(ticket).await;
                                let finished =
                                    workflow.finish_quiz(&mut session.write(), completion);
                                report_completion(finished, notice);
                            });
                            None
                        }
                        Err(err) => Some(err),
                    }
                }
                TutorIntent::SelectAnswer(option) => workflow
                    .select_answer(&mut session.write(), &option)
                    .err(),
                TutorIntent::Advance => workflow.advance(&mut session.write()).err(),
                TutorIntent::Reset => {
                    let reset = workflow.reset(&mut session.write());
                    if reset.is_ok() {
                        notice.set(None);
                    }
                    reset.err()
                }
            };

            if let Some(err) = rejected {
                warn!(intent = %kind, error = %err, "intent rejected");
            }
        })
    };

    #[cfg(test)]
    {
        let mut registered = use_signal(|| false);
        if !registered() {
            registered.set(true);
            if let Some(handles) = try_consume_context::<TutorTestHandles>() {
                handles.register(dispatch_intent, session);
            }
        }
    }

    let screen = map_screen(&session.read());

    rsx! {
        div { class: "tutor",
            Header {}
            main { class: "content",
                if let Some(current) = notice() {
                    NoticeBanner {
                        notice: current,
                        on_dismiss: move |()| notice.set(None),
                    }
                }
                match screen {
                    Screen::Upload => rsx! {
                        UploadScreen { on_intent: dispatch_intent }
                    },
                    Screen::Loading(kind) => rsx! {
                        LoadingScreen { kind }
                    },
                    Screen::Review(analysis) => rsx! {
                        ReviewScreen { analysis, on_intent: dispatch_intent }
                    },
                    Screen::Quiz(quiz) => rsx! {
                        QuizScreen { quiz, on_intent: dispatch_intent }
                    },
                    Screen::Result(result) => rsx! {
                        ResultScreen { result, on_intent: dispatch_intent }
                    },
                    Screen::Error => rsx! {
                        ErrorScreen { on_intent: dispatch_intent }
                    },
                }
            }
        }
    }
}

#[cfg(test)]
#[derive(Clone, Default)]
pub(crate) struct TutorTestHandles {
    dispatch: Rc<RefCell<Option<Callback<TutorIntent>>>>,
    session: Rc<RefCell<Option<Signal<Session>>>>,
}

#[cfg(test)]
impl TutorTestHandles {
    pub(crate) fn register(&self, dispatch: Callback<TutorIntent>, session: Signal<Session>) {
        *self.dispatch.borrow_mut() = Some(dispatch);
        *self.session.borrow_mut() = Some(session);
    }

    pub(crate) fn dispatch(&self) -> Callback<TutorIntent> {
        (*self.dispatch.borrow()).expect("tutor dispatch registered")
    }

    pub(crate) fn session(&self) -> Signal<Session> {
        (*self.session.borrow()).expect("tutor session registered")
    }
}
