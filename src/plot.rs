//! Presentational chart rendering.
//!
//! These collaborators sit outside the core loop: they consume the text
//! training log (lines matching `Iteration <int>: Accuracy <float>`) or a
//! dataset's label column and produce PNG artifacts. Nothing in the loop
//! depends on them. Charts are deliberately text-free so rendering needs no
//! font backend.

use std::fs;
use std::io;
use std::path::Path;

use plotters::prelude::*;
use regex::Regex;

/// Parse `Iteration <int>: Accuracy <float>` records out of a training log.
///
/// Lines that do not match the pattern are ignored.
pub fn parse_training_log<P: AsRef<Path>>(log_path: P) -> io::Result<Vec<(usize, f32)>> {
    let pattern =
        Regex::new(r"Iteration (\d+): Accuracy ([\d.]+)").expect("valid iteration pattern");
    let contents = fs::read_to_string(log_path)?;

    Ok(contents
        .lines()
        .filter_map(|line| {
            let captures = pattern.captures(line)?;
            let iteration = captures[1].parse().ok()?;
            let accuracy = captures[2].parse().ok()?;
            Some((iteration, accuracy))
        })
        .collect())
}

/// Render accuracy-over-iterations from a training log into a PNG.
pub fn plot_accuracy<P: AsRef<Path>, Q: AsRef<Path>>(log_path: P, out_path: Q) -> io::Result<()> {
    let records = parse_training_log(log_path)?;
    if records.is_empty() {
        return Err(io::Error::new(
            io::ErrorKind::InvalidData,
            "training log contains no iteration records",
        ));
    }

    let out_path = out_path.as_ref();
    if let Some(parent) = out_path.parent() {
        fs::create_dir_all(parent)?;
    }

    let x_max = records.iter().map(|&(i, _)| i).max().unwrap_or(0) as i32 + 1;

    let root = BitMapBackend::new(out_path, (800, 600)).into_drawing_area();
    root.fill(&WHITE)
        .map_err(|err| io::Error::new(io::ErrorKind::Other, err))?;

    let mut chart = ChartBuilder::on(&root)
        .margin(20)
        .build_cartesian_2d(0i32..x_max, 0f32..1f32)
        .map_err(|err| io::Error::new(io::ErrorKind::Other, err))?;

    chart
        .configure_mesh()
        .draw()
        .map_err(|err| io::Error::new(io::ErrorKind::Other, err))?;

    let points: Vec<(i32, f32)> = records
        .iter()
        .map(|&(i, acc)| (i as i32, acc))
        .collect();

    chart
        .draw_series(LineSeries::new(points.iter().cloned(), &BLUE))
        .map_err(|err| io::Error::new(io::ErrorKind::Other, err))?;
    chart
        .draw_series(
            points
                .iter()
                .map(|&point| Circle::new(point, 3, BLUE.filled())),
        )
        .map_err(|err| io::Error::new(io::ErrorKind::Other, err))?;

    root.present()
        .map_err(|err| io::Error::new(io::ErrorKind::Other, err))
}

/// Render the class distribution of a label column into a PNG bar chart.
pub fn plot_class_distribution<P: AsRef<Path>>(labels: &[usize], out_path: P) -> io::Result<()> {
    if labels.is_empty() {
        return Err(io::Error::new(
            io::ErrorKind::InvalidData,
            "no labels to plot",
        ));
    }

    let out_path = out_path.as_ref();
    if let Some(parent) = out_path.parent() {
        fs::create_dir_all(parent)?;
    }

    let n_classes = labels.iter().max().map(|&m| m + 1).unwrap_or(0);
    let mut counts = vec![0usize; n_classes];
    for &label in labels {
        counts[label] += 1;
    }
    let y_max = counts.iter().max().cloned().unwrap_or(0) as i32 + 1;

    let root = BitMapBackend::new(out_path, (640, 480)).into_drawing_area();
    root.fill(&WHITE)
        .map_err(|err| io::Error::new(io::ErrorKind::Other, err))?;

    let mut chart = ChartBuilder::on(&root)
        .margin(20)
        .build_cartesian_2d(0i32..n_classes as i32, 0i32..y_max)
        .map_err(|err| io::Error::new(io::ErrorKind::Other, err))?;

    chart
        .configure_mesh()
        .draw()
        .map_err(|err| io::Error::new(io::ErrorKind::Other, err))?;

    chart
        .draw_series(counts.iter().enumerate().map(|(class, &count)| {
            Rectangle::new(
                [(class as i32, 0), (class as i32 + 1, count as i32)],
                BLUE.filled(),
            )
        }))
        .map_err(|err| io::Error::new(io::ErrorKind::Other, err))?;

    root.present()
        .map_err(|err| io::Error::new(io::ErrorKind::Other, err))
}
