use clap::{AppSettings, Clap};
use dendron::meshing::{adapt, AdaptFlag};
use dendron::tree::Tree;
use log::info;

#[derive(Debug, Clap)]
#[clap(version = "1.0")]
#[clap(setting = AppSettings::ColoredHelp)]
struct Opts {
    #[clap(short = 'c', long, default_value = "100000")]
    capacity: usize,

    #[clap(short = 'l', long, default_value = "6")]
    max_level: i32,

    #[clap(short = 'n', long, default_value = "24")]
    num_cycles: usize,

    #[clap(short = 'o', long, default_value = "mesh.cbor")]
    outfile: String,
}




/**
 * Track a circular feature orbiting the domain center with an adaptive
 * quadtree: cells cut by the feature are refined toward the maximum level,
 * cells away from it are coarsened back toward the root.
 */
fn main() {
    let opts = Opts::parse();
    simple_logger::SimpleLogger::new()
        .with_level(log::LevelFilter::Info)
        .init()
        .unwrap();

    let mut tree = Tree::<2>::new(opts.capacity, [0.0, 0.0], 1.0);
    let max_level = opts.max_level;
    let orbit_radius = 0.25;
    let feature_radius = 0.15;

    for cycle in 0..opts.num_cycles {
        let phase = 2.0 * std::f64::consts::PI * cycle as f64 / opts.num_cycles as f64;
        let feature = [orbit_radius * phase.cos(), orbit_radius * phase.sin()];

        let (refined, coarsened) = adapt(&mut tree, move |tree: &Tree<2>, id| {
            let center = tree.center(id);
            let r = ((center[0] - feature[0]).powi(2) + (center[1] - feature[1]).powi(2)).sqrt();
            let cut = (r - feature_radius).abs() < tree.length(id);

            if cut && tree.level(id) < max_level {
                AdaptFlag::Refine
            } else if !cut && tree.level(id) > 0 {
                AdaptFlag::Coarsen
            } else {
                AdaptFlag::Keep
            }
        })
        .unwrap();

        info!(
            "[{}] split {} merged {} -> {} cells ({} leaves)",
            cycle,
            refined,
            coarsened,
            tree.size(),
            tree.leaf_ids().count());
    }

    let file = std::fs::File::create(&opts.outfile).unwrap();
    let mut buffer = std::io::BufWriter::new(file);
    ciborium::ser::into_writer(&tree, &mut buffer).unwrap();
    info!("wrote {}", opts.outfile);
}
