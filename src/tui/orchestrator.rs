//! Wires the panel view to the endpoint client.
//!
//! View handlers only queue an [`Action`]. The orchestrator drains the queue on the UI
//! thread, checks the credential, runs the workflow on the runtime in a background
//! thread, and applies the outcome to the view when it comes back.

use std::collections::HashSet;
use std::future::Future;
use std::sync::Arc;
use std::sync::mpsc;

use tokio::runtime::Runtime;

use crate::core::endpoint::{EndpointClient, LoadRequest};
use crate::core::notice::Notice;
use crate::core::workflow::{self, ListOutcome};

use super::view::PanelView;

/// A request queued by the view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    List,
    Load(String),
    Unload,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum Workflow {
    List,
    Load,
    Unload,
}

impl Workflow {
    fn busy_message(self) -> &'static str {
        match self {
            Workflow::List => "A model list request is already in progress",
            Workflow::Load => "A model load is already in progress",
            Workflow::Unload => "A model unload is already in progress",
        }
    }
}

impl Action {
    fn workflow(&self) -> Workflow {
        match self {
            Action::List => Workflow::List,
            Action::Load(_) => Workflow::Load,
            Action::Unload => Workflow::Unload,
        }
    }
}

/// A finished workflow, sent back to the UI thread.
enum Completion {
    Listed(ListOutcome),
    Notified(Workflow, Notice),
}

pub struct Orchestrator {
    client: Arc<EndpointClient>,
    rt: Arc<Runtime>,
    actions_tx: mpsc::Sender<Action>,
    actions_rx: mpsc::Receiver<Action>,
    done_tx: mpsc::Sender<Completion>,
    done_rx: mpsc::Receiver<Completion>,
    /// At most one run per workflow; a second trigger is rejected with a warning.
    in_flight: HashSet<Workflow>,
}

impl Orchestrator {
    pub fn new(client: EndpointClient, rt: Arc<Runtime>) -> Self {
        let (actions_tx, actions_rx) = mpsc::channel();
        let (done_tx, done_rx) = mpsc::channel();
        Self {
            client: Arc::new(client),
            rt,
            actions_tx,
            actions_rx,
            done_tx,
            done_rx,
            in_flight: HashSet::new(),
        }
    }

    /// Register the view's button handlers, restore the stored credential, and list once
    /// if one was found.
    pub fn start(&mut self, view: &mut PanelView) {
        log::info!("Control panel using endpoint {}", self.client.base_url());
        let tx = self.actions_tx.clone();
        view.on_list_requested(move || {
            let _ = tx.send(Action::List);
        });
        let tx = self.actions_tx.clone();
        view.on_unload_requested(move || {
            let _ = tx.send(Action::Unload);
        });

        if view.load_stored_credential().is_some() {
            log::info!("Stored API key found; listing models");
            self.dispatch(Action::List, view);
        }
    }

    /// Run queued requests and apply finished ones. Call once per UI loop iteration.
    pub fn pump(&mut self, view: &mut PanelView) {
        while let Ok(action) = self.actions_rx.try_recv() {
            self.dispatch(action, view);
        }
        while let Ok(done) = self.done_rx.try_recv() {
            self.apply(done, view);
        }
        view.set_busy(!self.in_flight.is_empty());
    }

    #[cfg(test)]
    pub(crate) fn is_idle(&self) -> bool {
        self.in_flight.is_empty()
    }

    fn dispatch(&mut self, action: Action, view: &mut PanelView) {
        let credential = match workflow::require_credential(view.credential()) {
            Ok(c) => c,
            Err(notice) => return view.show_notice(notice),
        };
        let kind = action.workflow();
        if !self.in_flight.insert(kind) {
            log::debug!("Rejected {:?}: already in flight", action);
            return view.show_notice(Notice::warning(kind.busy_message()));
        }

        let client = Arc::clone(&self.client);
        match action {
            Action::List => self.run_in_background(async move {
                Completion::Listed(workflow::list(&client, &credential).await)
            }),
            Action::Load(model_id) => {
                let request = LoadRequest::new(model_id, view.max_seq_len(), view.cache_mode());
                self.run_in_background(async move {
                    let notice = workflow::load(&client, &credential, &request).await;
                    Completion::Notified(Workflow::Load, notice)
                })
            }
            Action::Unload => self.run_in_background(async move {
                Completion::Notified(Workflow::Unload, workflow::unload(&client, &credential).await)
            }),
        }
        view.set_busy(true);
    }

    fn run_in_background<F>(&self, work: F)
    where
        F: Future<Output = Completion> + Send + 'static,
    {
        let rt = Arc::clone(&self.rt);
        let tx = self.done_tx.clone();
        std::thread::spawn(move || {
            let done = rt.block_on(work);
            let _ = tx.send(done);
        });
    }

    fn apply(&mut self, done: Completion, view: &mut PanelView) {
        match done {
            Completion::Listed(outcome) => {
                self.in_flight.remove(&Workflow::List);
                if let ListOutcome::Listed(models) = &outcome {
                    let tx = self.actions_tx.clone();
                    view.display_models(models.clone(), move |id| {
                        let _ = tx.send(Action::Load(id.to_string()));
                    });
                }
                view.show_notice(outcome.notice());
            }
            Completion::Notified(kind, notice) => {
                self.in_flight.remove(&kind);
                view.show_notice(notice);
            }
        }
    }
}
