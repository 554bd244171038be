//! Scene composition: seafloor first, then a random interleaving of fish,
//! sharks, and corals until every quota is met, then the color blur.

use reefgen_core::canvas::CanvasPair;
use reefgen_core::error::ReefError;
use reefgen_core::label::LabelEncoding;
use reefgen_core::prng::Xorshift64;
use reefgen_core::seed::SceneSeed;
use reefgen_core::shape::Point;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::coral::Coral;
use crate::organism::{Fish, Ground, Organism, Shark};
use crate::params::SceneParams;
use crate::post;

/// Organism categories with a per-scene quota.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Fish,
    Shark,
    Coral,
}

/// Where one fish or shark was placed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Placement {
    pub category: Category,
    /// Body centre.
    pub position: Point,
    /// Body extents `(dx, dy)`; tails and fins reach beyond them.
    pub size: (i32, i32),
}

/// What the composer actually drew.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SceneReport {
    pub ground_fraction: f64,
    /// First seafloor row.
    pub ground_top: i32,
    pub fish: u32,
    pub sharks: u32,
    pub corals: u32,
    /// Trunk base of every coral, in draw order.
    pub coral_bases: Vec<Point>,
    /// Every fish and shark, in draw order.
    #[serde(default)]
    pub swimmers: Vec<Placement>,
    /// Line segments stroked across all corals, trunks included.
    pub branch_segments: usize,
    pub blur_radius: u32,
    /// Category of every organism, in draw order.
    pub order: Vec<Category>,
}

/// A finished scene: rasters plus the report of how they were drawn.
#[derive(Debug, Clone)]
pub struct Scene {
    pub canvas: CanvasPair,
    pub report: SceneReport,
}

/// Composes one scene from its seed.
///
/// Validates dimensions and params before drawing anything. The whole scene
/// is a pure function of `seed`, `params`, and `encoding`.
pub fn compose(
    seed: &SceneSeed,
    params: &SceneParams,
    encoding: LabelEncoding,
) -> Result<Scene, ReefError> {
    seed.validate()?;
    params.validate()?;

    let (width, height) = (seed.width, seed.height);
    let mut canvas = CanvasPair::new(width, height, params.background, encoding)?;
    let mut rng = Xorshift64::new(seed.seed);
    let mut report = SceneReport {
        order: Vec::with_capacity(seed.total_quota() as usize),
        ..SceneReport::default()
    };

    let ground = Ground::sample(&mut rng, params);
    ground.draw(&mut canvas, &mut rng);
    report.ground_fraction = ground.fraction;
    report.ground_top = ground.top(height);
    let band = ground.coral_band(height);

    let mut eligible: Vec<(Category, u32)> = [
        (Category::Fish, seed.fish),
        (Category::Shark, seed.sharks),
        (Category::Coral, seed.corals),
    ]
    .into_iter()
    .filter(|&(_, quota)| quota > 0)
    .collect();

    while !eligible.is_empty() {
        let pick = rng.next_usize(eligible.len());
        let category = eligible[pick].0;
        match category {
            Category::Fish => {
                let fish = Fish::sample(&mut rng, params, width, height);
                trace!(?fish, "fish");
                fish.draw(&mut canvas, &mut rng);
                report.swimmers.push(Placement {
                    category,
                    position: fish.position,
                    size: fish.size,
                });
                report.fish += 1;
            }
            Category::Shark => {
                let shark = Shark::sample(&mut rng, params, width, height);
                trace!(?shark, "shark");
                shark.draw(&mut canvas, &mut rng);
                report.swimmers.push(Placement {
                    category,
                    position: shark.position,
                    size: shark.size,
                });
                report.sharks += 1;
            }
            Category::Coral => {
                let coral = Coral::sample(&mut rng, params, width, band);
                let branches = coral.render(&mut canvas, &mut rng);
                trace!(?coral, segments = branches.len(), "coral");
                report.coral_bases.push(coral.position);
                report.branch_segments += branches.len();
                report.corals += 1;
            }
        }
        report.order.push(category);

        eligible[pick].1 -= 1;
        if eligible[pick].1 == 0 {
            eligible.remove(pick);
        }
    }

    report.blur_radius = post::sample_blur_radius(&mut rng, params.max_blur_radius);
    post::soften(&mut canvas, report.blur_radius)?;

    debug!(
        seed = seed.seed,
        width,
        height,
        fish = report.fish,
        sharks = report.sharks,
        corals = report.corals,
        segments = report.branch_segments,
        blur = report.blur_radius,
        "composed scene"
    );
    Ok(Scene { canvas, report })
}
