//! The maze generator: owns the grid, the single random stream, and the
//! bounded retry loop around the carve.

mod carve;
mod join;

use rand_chacha::rand_core::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::config::GeneratorConfig;
use crate::endpoint::{self, EndpointSpec, PathEndpoint};
use crate::error::{Error, Result};
use crate::geometry::RoomSize;
use crate::grid::{RoomGrid, WallGrid};
use crate::layout;
use crate::maze::Maze;
use crate::modifier;
use crate::status::{StatusEvent, StatusSink};
use crate::verify;

pub struct Generator {
    config: GeneratorConfig,
    grid: RoomGrid,
    geometry: layout::CellGeometry,
    rng: ChaCha8Rng,
    endpoints: Vec<PathEndpoint>,
}

impl Generator {
    /// Validate the configuration and commit the room grid. The random
    /// stream is seeded from the configuration; callers that want varying
    /// output supply fresh entropy there.
    pub fn new(config: GeneratorConfig) -> Result<Self> {
        config.validate()?;
        let size = layout::grid_size(&config)?;
        let geometry = layout::cell_geometry(&config, size);
        let rng = ChaCha8Rng::seed_from_u64(config.seed.unwrap_or(0));
        Ok(Self { grid: RoomGrid::new(size), geometry, rng, endpoints: Vec::new(), config })
    }

    pub fn grid_size(&self) -> RoomSize {
        self.grid.size()
    }

    /// Run the full pipeline: modifiers, endpoints, and the retried carve.
    /// Status events are pushed to the sink at phase boundaries.
    pub fn generate(mut self, sink: &mut dyn StatusSink) -> Result<Maze> {
        let size = self.grid.size();
        sink.event(&StatusEvent::LayoutComputed {
            nx: size.width,
            ny: size.height,
            cell_mm: self.geometry.cell_mm(),
        });

        if let Err(error) = modifier::apply_modifiers(
            &mut self.grid,
            &self.config.modifiers,
            &mut self.rng,
            self.config.ignore_errors,
        ) {
            sink.event(&StatusEvent::Aborted(error.to_string()));
            return Err(error);
        }

        let specs = if self.config.endpoints.is_empty() {
            EndpointSpec::default_pair()
        } else {
            self.config.endpoints.clone()
        };
        self.endpoints = match endpoint::place_endpoints(
            &mut self.grid,
            &specs,
            &mut self.rng,
            self.config.ignore_errors,
        ) {
            Ok(endpoints) => endpoints,
            Err(error) => {
                sink.event(&StatusEvent::Aborted(error.to_string()));
                return Err(error);
            }
        };

        if self.config.layout_only {
            // Nothing is carved; the output reveals the prepared layout.
            sink.event(&StatusEvent::Completed);
            return Ok(self.build_maze());
        }

        let pristine = self.grid.snapshot_walls();
        for attempt in 1..=self.config.maximum_attempts {
            sink.event(&StatusEvent::AttemptStarted(attempt));
            self.grid.reset_for_attempt(&pristine);
            match self.attempt(sink, &pristine) {
                Ok(()) => {
                    sink.event(&StatusEvent::VerifyOk);
                    sink.event(&StatusEvent::Completed);
                    return Ok(self.build_maze());
                }
                Err(error) => {
                    log::debug!("attempt {attempt} failed: {error}");
                }
            }
        }

        let attempts = self.config.maximum_attempts;
        if self.config.ignore_errors {
            log::warn!("emitting the last partial maze after {attempts} failed attempts");
            sink.event(&StatusEvent::Completed);
            return Ok(self.build_maze());
        }
        let error = Error::MaxAttemptsExceeded { attempts };
        sink.event(&StatusEvent::Aborted(error.to_string()));
        Err(error)
    }

    fn attempt(&mut self, sink: &mut dyn StatusSink, pristine: &WallGrid) -> Result<()> {
        let mut next_path_id =
            carve::carve_primary_paths(&mut self.grid, &self.endpoints, &mut self.rng);
        carve::carve_dead_end_stubs(
            &mut self.grid,
            &self.endpoints,
            &mut self.rng,
            &mut next_path_id,
        );
        sink.event(&StatusEvent::PathsCarved);

        let islands = carve::fill_islands(
            &mut self.grid,
            self.config.allow_islands,
            &mut self.rng,
            &mut next_path_id,
        )?;
        sink.event(&StatusEvent::IslandsFilled(islands));

        join::join_components(&mut self.grid, &self.endpoints, sink)?;

        if let Err(reason) = verify::verify(&self.grid, &self.endpoints, pristine) {
            sink.event(&StatusEvent::VerifyFailed(reason.clone()));
            return Err(Error::CannotJoin(reason));
        }
        Ok(())
    }

    fn build_maze(&self) -> Maze {
        Maze::from_grid(&self.grid, &self.geometry, &self.endpoints)
    }
}
