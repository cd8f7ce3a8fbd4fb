use std::path::PathBuf;
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;

use eframe::egui::{self, Context, Vec2};
use tracing::{error, info};

use crate::graph::{KnowledgeGraph, Selection};
use crate::records::{Library, load_library};

mod graph;
mod ui;

#[derive(Clone, Debug, Default)]
pub struct RecordPaths {
    pub knowledge: Option<PathBuf>,
    pub memories: Option<PathBuf>,
}

pub struct KnowledgeGraphApp {
    paths: RecordPaths,
    state: AppState,
    reload_rx: Option<Receiver<Result<Library, String>>>,
}

enum AppState {
    Loading {
        rx: Receiver<Result<Library, String>>,
    },
    Ready(Box<ViewModel>),
    Error(String),
}

struct ViewModel {
    library: Library,
    graph: KnowledgeGraph,
    selection: Selection,
    search: String,
    layout_extent: Option<Vec2>,
}

impl KnowledgeGraphApp {
    pub fn new(_cc: &eframe::CreationContext<'_>, paths: RecordPaths) -> Self {
        let state = Self::start_load(paths.clone());
        Self {
            paths,
            state,
            reload_rx: None,
        }
    }

    fn spawn_load(paths: RecordPaths) -> Receiver<Result<Library, String>> {
        let (tx, rx) = mpsc::channel();

        thread::spawn(move || {
            let result = load_library(paths.knowledge.as_deref(), paths.memories.as_deref())
                .map_err(|error| format!("{error:#}"));
            if let Err(error) = &result {
                error!(%error, "failed to load records");
            }
            let _ = tx.send(result);
        });

        rx
    }

    fn start_load(paths: RecordPaths) -> AppState {
        AppState::Loading {
            rx: Self::spawn_load(paths),
        }
    }

    fn ready_state(result: Result<Library, String>) -> AppState {
        match result {
            Ok(library) => AppState::Ready(Box::new(ViewModel::new(library))),
            Err(error) => AppState::Error(error),
        }
    }
}

impl eframe::App for KnowledgeGraphApp {
    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
        let mut transition = None;

        match &mut self.state {
            AppState::Loading { rx } => {
                if let Ok(result) = rx.try_recv() {
                    transition = Some(Self::ready_state(result));
                } else {
                    ctx.request_repaint();
                }

                egui::CentralPanel::default().show(ctx, |ui| {
                    ui.vertical_centered(|ui| {
                        ui.add_space(120.0);
                        ui.heading("Loading knowledge sources and memories...");
                        ui.add_space(8.0);
                        ui.spinner();
                    });
                });
            }
            AppState::Error(error) => {
                egui::CentralPanel::default().show(ctx, |ui| {
                    ui.heading("Failed to load records");
                    ui.add_space(6.0);
                    ui.label(error.as_str());
                    ui.add_space(10.0);
                    if ui.button("Retry").clicked() {
                        transition = Some(Self::start_load(self.paths.clone()));
                    }
                });
            }
            AppState::Ready(model) => {
                let mut reload_requested = false;
                let is_reloading = self.reload_rx.is_some();
                model.show(ctx, &self.paths, &mut reload_requested, is_reloading);

                if reload_requested && self.reload_rx.is_none() {
                    info!("reloading records");
                    self.reload_rx = Some(Self::spawn_load(self.paths.clone()));
                }

                if let Some(rx) = self.reload_rx.take() {
                    match rx.try_recv() {
                        Ok(result) => {
                            transition = Some(Self::ready_state(result));
                        }
                        Err(TryRecvError::Empty) => {
                            self.reload_rx = Some(rx);
                            ctx.request_repaint();
                        }
                        Err(TryRecvError::Disconnected) => {
                            transition = Some(AppState::Error(
                                "Background load worker disconnected".to_owned(),
                            ));
                        }
                    }
                }
            }
        }

        if let Some(next_state) = transition {
            self.reload_rx = None;
            self.state = next_state;
        }
    }
}
