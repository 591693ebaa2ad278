use std::cell::RefCell;
use std::collections::VecDeque;
use std::path::PathBuf;
use std::rc::Rc;
use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};
use std::thread;

use eframe::egui::{self, Context};
use orgflow_layout::model::{LoadedGraph, WorkflowModel, load_graph_file};
use orgflow_layout::{
    EngineConfig, FrameLoop, GraphSnapshot, InteractionEvent, LayoutEngine, ManualScheduler,
    SimulationConfig,
};
use tracing::{info, warn};

mod graph;
mod render_utils;
mod ui;

#[derive(Clone, Debug)]
pub enum GraphSource {
    Demo,
    File(PathBuf),
}

impl GraphSource {
    fn describe(&self) -> String {
        match self {
            Self::Demo => "built-in demo organization".to_owned(),
            Self::File(path) => path.display().to_string(),
        }
    }

    fn load(&self) -> anyhow::Result<LoadedGraph> {
        match self {
            Self::Demo => Ok(LoadedGraph::demo()),
            Self::File(path) => load_graph_file(path),
        }
    }
}

type LoadResult = Result<Option<WorkflowModel>, String>;

pub struct OrgFlowApp {
    source: GraphSource,
    engine: Rc<RefCell<LayoutEngine>>,
    scheduler: ManualScheduler,
    _frame_loop: FrameLoop,
    state: AppState,
    reload_rx: Option<Receiver<LoadResult>>,
}

enum AppState {
    Loading { rx: Receiver<LoadResult> },
    Ready(Box<ViewModel>),
    Error(String),
}

struct ViewModel {
    engine: Rc<RefCell<LayoutEngine>>,
    workflow: Option<WorkflowModel>,
    search: String,
    physics: SimulationConfig,
    show_edge_labels: bool,
    show_fps_bar: bool,
    fps_current: f32,
    frame_times_ms: VecDeque<f32>,
}

impl OrgFlowApp {
    pub fn new(
        _cc: &eframe::CreationContext<'_>,
        source: GraphSource,
        config: EngineConfig,
    ) -> Self {
        let engine = Rc::new(RefCell::new(LayoutEngine::new(config)));
        let mut scheduler = ManualScheduler::new();
        let frame_loop = FrameLoop::start(&engine, &mut scheduler);
        let state = Self::start_load(&source, &engine);

        Self {
            source,
            engine,
            scheduler,
            _frame_loop: frame_loop,
            state,
            reload_rx: None,
        }
    }

    fn spawn_load(source: GraphSource, snapshots: Sender<GraphSnapshot>) -> Receiver<LoadResult> {
        let (tx, rx) = mpsc::channel();

        thread::spawn(move || {
            let result = source
                .load()
                .map_err(|error| format!("{error:#}"))
                .and_then(|loaded| {
                    snapshots
                        .send(loaded.snapshot)
                        .map_err(|_| "layout engine is gone".to_owned())?;
                    Ok(loaded.workflow)
                });
            let _ = tx.send(result);
        });

        rx
    }

    fn start_load(source: &GraphSource, engine: &RefCell<LayoutEngine>) -> AppState {
        AppState::Loading {
            rx: Self::spawn_load(source.clone(), engine.borrow().snapshot_sender()),
        }
    }
}

impl eframe::App for OrgFlowApp {
    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
        self.scheduler.run_frame();

        let mut transition = None;

        match &mut self.state {
            AppState::Loading { rx } => {
                if let Ok(result) = rx.try_recv() {
                    transition = Some(match result {
                        Ok(workflow) => {
                            info!(source = %self.source.describe(), "graph loaded");
                            AppState::Ready(Box::new(ViewModel::new(
                                Rc::clone(&self.engine),
                                workflow,
                            )))
                        }
                        Err(error) => {
                            warn!(%error, "failed to load graph");
                            AppState::Error(error)
                        }
                    });
                }

                egui::CentralPanel::default().show(ctx, |ui| {
                    ui.vertical_centered(|ui| {
                        ui.add_space(120.0);
                        ui.heading("Loading organization graph...");
                        ui.add_space(8.0);
                        ui.spinner();
                    });
                });
                ctx.request_repaint();
            }
            AppState::Error(error) => {
                let mut retry = false;
                egui::CentralPanel::default().show(ctx, |ui| {
                    ui.heading("Failed to load organization graph");
                    ui.add_space(6.0);
                    ui.label(error.as_str());
                    ui.add_space(10.0);
                    retry = ui.button("Retry").clicked();
                });
                if retry {
                    transition = Some(Self::start_load(&self.source, &self.engine));
                }
            }
            AppState::Ready(model) => {
                let mut reload_requested = false;
                let is_reloading = self.reload_rx.is_some();
                model.show(
                    ctx,
                    &self.source.describe(),
                    &mut reload_requested,
                    is_reloading,
                );

                if reload_requested && self.reload_rx.is_none() {
                    self.reload_rx = Some(Self::spawn_load(
                        self.source.clone(),
                        self.engine.borrow().snapshot_sender(),
                    ));
                }

                if let Some(rx) = self.reload_rx.take() {
                    match rx.try_recv() {
                        Ok(Ok(workflow)) => {
                            info!(source = %self.source.describe(), "graph reloaded");
                            model.workflow = workflow;
                        }
                        Ok(Err(error)) => {
                            warn!(%error, "failed to reload graph");
                            transition = Some(AppState::Error(error));
                        }
                        Err(TryRecvError::Empty) => {
                            self.reload_rx = Some(rx);
                        }
                        Err(TryRecvError::Disconnected) => {
                            transition = Some(AppState::Error(
                                "Background load worker disconnected".to_owned(),
                            ));
                        }
                    }
                }

                if self.engine.borrow().is_live() {
                    ctx.request_repaint();
                }
            }
        }

        if let Some(next_state) = transition {
            self.reload_rx = None;
            self.state = next_state;
        }
    }
}

impl ViewModel {
    fn dispatch(&self, event: InteractionEvent) {
        if let Err(error) = self.engine.borrow_mut().handle_event(event) {
            warn!(%error, "interaction event rejected");
        }
    }
}
