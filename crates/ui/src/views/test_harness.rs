use std::sync::Arc;

use dioxus::core::NoOpMutations;
use dioxus::prelude::*;
use services::{Clock, ScriptedGateway, WorkflowService};
use tutor_core::model::{Session, UploadedImage};
use tutor_core::time::fixed_now;

use crate::context::{UiApp, build_app_context};
use crate::views::TutorView;
use crate::views::tutor::TutorTestHandles;
use crate::vm::TutorIntent;

#[derive(Clone)]
struct TestApp {
    workflow: Arc<WorkflowService>,
}

impl UiApp for TestApp {
    fn workflow(&self) -> Arc<WorkflowService> {
        Arc::clone(&self.workflow)
    }
}

#[derive(Props, Clone)]
struct ViewHarnessProps {
    app: Arc<TestApp>,
    handles: TutorTestHandles,
}

impl PartialEq for ViewHarnessProps {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

#[component]
fn TutorHarness(props: ViewHarnessProps) -> Element {
    let app: Arc<dyn UiApp> = props.app.clone();
    use_context_provider(|| build_app_context(&app));
    use_context_provider(|| props.handles.clone());
    rsx! { TutorView {} }
}

pub struct ViewHarness {
    pub dom: VirtualDom,
    pub gateway: ScriptedGateway,
    pub handles: TutorTestHandles,
}

impl ViewHarness {
    pub fn rebuild(&mut self) {
        self.dom.rebuild_in_place();
        drive_dom(&mut self.dom);
    }

    pub async fn drive_async(&mut self) {
        let _ = tokio::time::timeout(
            std::time::Duration::from_millis(50),
            self.dom.wait_for_work(),
        )
        .await;
        self.dom.render_immediate(&mut NoOpMutations);
        self.dom.process_events();
    }

    /// Dispatch an intent inside the dom's runtime, then let spawned work finish.
    pub async fn send(&mut self, intent: TutorIntent) {
        let dispatch = self.handles.dispatch();
        self.dom.in_runtime(|| dispatch.call(intent));
        self.drive_async().await;
        self.drive_async().await;
    }

    pub fn session(&self) -> Session {
        let session = self.handles.session();
        self.dom.in_runtime(|| session.peek().clone())
    }

    pub fn render(&self) -> String {
        dioxus_ssr::render(&self.dom)
    }
}

pub fn drive_dom(dom: &mut VirtualDom) {
    dom.process_events();
    dom.render_immediate(&mut NoOpMutations);
    dom.process_events();
}

pub fn setup_view_harness() -> ViewHarness {
    let gateway = ScriptedGateway::new();
    let workflow = Arc::new(WorkflowService::new(
        Arc::new(gateway.clone()),
        Clock::fixed(fixed_now()),
    ));
    let handles = TutorTestHandles::default();
    let dom = VirtualDom::new_with_props(
        TutorHarness,
        ViewHarnessProps {
            app: Arc::new(TestApp { workflow }),
            handles: handles.clone(),
        },
    );
    ViewHarness {
        dom,
        gateway,
        handles,
    }
}

pub fn sample_image() -> UploadedImage {
    UploadedImage::new(vec![0x89, b'P', b'N', b'G'], tutor_core::model::MediaType::Png)
        .expect("valid image")
}
