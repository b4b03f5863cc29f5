use crate::gui_bridge::model::HeatmapModel;
use crate::workflow::runner::Runner;
use log::{error, info, warn};
use rssicore::model::Coordinate;
use rssicore::processing::{LogRow, SurveyInput, ValueColumn};
use rssicore::telemetry::MetricsRecorder;
use serde::Deserialize;
use serde_json::json;
use std::{
    net::SocketAddr,
    sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard},
    thread,
};
use tokio::runtime::Builder;
use warp::{http::StatusCode, Filter};

pub fn gui_bind_address() -> SocketAddr {
    SocketAddr::from(([127, 0, 0, 1], 9000))
}

type SharedModel = Arc<RwLock<HeatmapModel>>;

fn read(state: &SharedModel) -> RwLockReadGuard<'_, HeatmapModel> {
    state.read().unwrap_or_else(|poisoned| poisoned.into_inner())
}

fn write(state: &SharedModel) -> RwLockWriteGuard<'_, HeatmapModel> {
    state.write().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Survey submitted over HTTP instead of read from disk.
#[derive(Debug, Clone, Deserialize)]
pub struct IngestPayload {
    pub rows: Vec<LogRow>,
    pub coordinates: Vec<Coordinate>,
    pub height: usize,
    pub width: usize,
    /// Row values are already calibrated and skip the calibrator.
    #[serde(default)]
    pub calibrated: bool,
}

impl IngestPayload {
    pub fn column(&self) -> ValueColumn {
        if self.calibrated {
            ValueColumn::Calibrated
        } else {
            ValueColumn::Raw
        }
    }

    pub fn into_input(self) -> SurveyInput {
        SurveyInput {
            column: self.column(),
            rows: self.rows,
            coordinates: self.coordinates,
            height: self.height,
            width: self.width,
        }
    }
}

/// Bridge that serves the latest heatmap to the renderer over HTTP.
pub struct GuiBridge {
    state: SharedModel,
}

impl GuiBridge {
    pub fn new() -> Self {
        Self {
            state: Arc::new(RwLock::new(HeatmapModel::default())),
        }
    }

    /// Starts the HTTP endpoint on a background thread.
    pub fn spawn(&self, runner: Arc<Runner>, address: SocketAddr) {
        let state = self.state.clone();
        let metrics = runner.metrics();
        let state_filter = warp::any().map(move || state.clone());
        let runner_filter = warp::any().map(move || runner.clone());
        let metrics_filter = warp::any().map(move || metrics.clone());

        let heatmap_route = warp::path("heatmap")
            .and(warp::get())
            .and(state_filter.clone())
            .map(|state: SharedModel| {
                let model = read(&state);
                warp::reply::json(&*model)
            });

        let grid_route = warp::path("grid")
            .and(warp::get())
            .and(state_filter.clone())
            .map(|state: SharedModel| {
                let model = read(&state);
                warp::reply::json(&model.grid)
            });

        let metrics_route = warp::path("metrics")
            .and(warp::get())
            .and(metrics_filter)
            .map(|metrics: Arc<MetricsRecorder>| warp::reply::json(&metrics.snapshot()));

        let ingest_route = warp::path("ingest")
            .and(warp::post())
            .and(warp::body::json())
            .and(state_filter)
            .and(runner_filter)
            .and_then(
                |payload: IngestPayload, state: SharedModel, runner: Arc<Runner>| async move {
                    let sigma = runner.config().sigma;
                    match runner.execute(payload.into_input()) {
                        Ok(output) => {
                            let model = HeatmapModel::from_output(&output, sigma);
                            let samples = model.points.len();
                            *write(&state) = model;
                            info!("ingested survey with {} samples", samples);
                            Ok::<_, warp::Rejection>(warp::reply::with_status(
                                warp::reply::json(&json!({"status": "ok", "samples": samples})),
                                StatusCode::OK,
                            ))
                        }
                        Err(err) => {
                            warn!("ingest error: {:#}", err);
                            Ok(warp::reply::with_status(
                                warp::reply::json(&json!({
                                    "status": "error",
                                    "message": format!("{:#}", err)
                                })),
                                StatusCode::UNPROCESSABLE_ENTITY,
                            ))
                        }
                    }
                },
            );

        thread::spawn(move || {
            let routes = heatmap_route
                .or(grid_route)
                .or(metrics_route)
                .or(ingest_route);
            let runtime = match Builder::new_current_thread().enable_all().build() {
                Ok(runtime) => runtime,
                Err(err) => {
                    error!("failed to build bridge runtime: {}", err);
                    return;
                }
            };
            runtime.block_on(async move {
                warp::serve(routes).run(address).await;
            });
        });
    }

    pub fn publish(&self, model: HeatmapModel) {
        info!(
            "[GUI] {} points on a {}x{} heatmap",
            model.points.len(),
            model.width,
            model.height
        );
        *write(&self.state) = model;
    }

    pub fn publish_status(&self, message: &str) {
        info!("[GUI] {}", message);
    }

    #[cfg(test)]
    pub fn snapshot(&self) -> HeatmapModel {
        read(&self.state).clone()
    }
}

impl Default for GuiBridge {
    fn default() -> Self {
        Self::new()
    }
}
