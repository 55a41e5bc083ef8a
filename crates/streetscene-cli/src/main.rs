// SPDX-License-Identifier: Apache-2.0
// Copyright © 2025 Au-Zone Technologies. All Rights Reserved.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use streetscene::{
    AnnotateConfig, Error, RatioConfig, run_annotate, run_ratio, write_report,
};

#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Pipeline Command
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, PartialEq, Clone, Debug)]
enum Command {
    /// Colorize label regions with each class's representative color,
    /// stamp class ids over a grid overlay, and report which surface the
    /// kickboard in each scene is standing on.  Annotated images are
    /// saved to the output directory; a label file whose image is
    /// missing is skipped with a notice.
    Annotate {
        /// Directory containing `<name>.txt` label files
        labels: PathBuf,

        /// Directory containing matching `<name>.jpg` images
        images: PathBuf,

        /// Directory receiving the annotated `<name>.jpg` images
        output: PathBuf,

        /// Optional JSON report path for the per-scene results
        #[clap(long)]
        report: Option<PathBuf>,
    },
    /// Compare each kickboard rectangle's area against the
    /// color-thresholded sidewalk area of the matching segmentation
    /// render and report the ratio.  The rectangle overlay and the mask
    /// visualization are saved to the output directory.
    SidewalkRatio {
        /// Directory containing `<name>_coordinates.txt` rectangle files
        boxes: PathBuf,

        /// Directory containing matching `<name>_output.jpg` images
        images: PathBuf,

        /// Directory receiving the `_visualized` and `_green_area` images
        output: PathBuf,

        /// Optional JSON report path for the per-file results
        #[clap(long)]
        report: Option<PathBuf>,
    },
}

fn handle_annotate(
    labels: PathBuf,
    images: PathBuf,
    output: PathBuf,
    report: Option<PathBuf>,
) -> Result<(), Error> {
    let config = AnnotateConfig {
        labels_dir: labels,
        images_dir: images,
        output_dir: output,
    };
    let outcomes = run_annotate(&config)?;

    for outcome in &outcomes {
        match outcome.surface.as_deref() {
            Some(surface) => println!("The kickboard for {}: is in {}", outcome.name, surface),
            None => println!("Image file for {}.txt not found, skipping.", outcome.name),
        }
    }

    if let Some(path) = report {
        write_report(&path, &outcomes)?;
    }
    Ok(())
}

fn handle_ratio(
    boxes: PathBuf,
    images: PathBuf,
    output: PathBuf,
    report: Option<PathBuf>,
) -> Result<(), Error> {
    let config = RatioConfig {
        boxes_dir: boxes,
        images_dir: images,
        output_dir: output,
    };
    let outcomes = run_ratio(&config)?;

    for outcome in &outcomes {
        if outcome.skipped {
            println!("Image file for {} not found, skipping.", outcome.file);
        } else {
            println!(
                "파일: {}, sidewalk 면적: {}, 킥보드 면적: {}, 비율: {:.4}",
                outcome.file, outcome.sidewalk_area, outcome.kickboard_area, outcome.ratio
            );
        }
    }

    if let Some(path) = report {
        write_report(&path, &outcomes)?;
    }
    Ok(())
}

fn main() -> Result<(), Error> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    match args.cmd {
        Command::Annotate {
            labels,
            images,
            output,
            report,
        } => handle_annotate(labels, images, output, report),
        Command::SidewalkRatio {
            boxes,
            images,
            output,
            report,
        } => handle_ratio(boxes, images, output, report),
    }
}
