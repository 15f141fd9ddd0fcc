// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Render a tree's shape as SVG.
//!
//! Rebuilds the picture purely from the read-only shape accessor: node regions
//! become outlined rectangles, points become dots. The tree is y-up, SVG is
//! y-down, so everything goes through one flipping transform.
//!
//! Run:
//! - `cargo run -p quadtree_demos --example render_svg > tree.svg`

use std::fmt::Write;
use std::num::NonZeroUsize;

use kurbo::{Affine, Circle, Rect, Shape};
use quadtree_index::QuadTree;
use tracing::info;
use tracing_subscriber::EnvFilter;

const SCALE: f64 = 6.0;
const TOLERANCE: f64 = 0.1;

fn main() -> std::fmt::Result {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let mut tree = QuadTree::with_capacity(NonZeroUsize::new(2).unwrap());
    let points = [
        (12, 85),
        (18, 90),
        (22, 70),
        (64, 40),
        (70, 35),
        (71, 33),
        (90, 8),
        (50, 50),
    ];
    for (x, y) in points {
        let _ = tree.insert(x, y);
    }
    let shape = tree.shape();
    info!(nodes = shape.nodes.len(), points = shape.points.len(), "rendering");

    let side = shape.bounds.max_y;
    let to_svg = Affine::new([SCALE, 0.0, 0.0, -SCALE, 0.0, side * SCALE]);

    let mut out = String::new();
    writeln!(
        out,
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{w}\" height=\"{w}\">",
        w = side * SCALE
    )?;
    for node in &shape.nodes {
        let b = node.bounds;
        let region = to_svg * Rect::new(b.min_x, b.min_y, b.max_x, b.max_y).to_path(TOLERANCE);
        let fill = if node.children.is_some() { "none" } else { "#f4f4f4" };
        writeln!(
            out,
            "  <path id=\"node{}\" d=\"{}\" fill=\"{fill}\" stroke=\"#333\"/>",
            node.id.get(),
            region.to_svg()
        )?;
    }
    for p in &shape.points {
        let dot = to_svg * Circle::new((p.x as f64, p.y as f64), 1.0).to_path(TOLERANCE);
        writeln!(
            out,
            "  <path id=\"point{}\" d=\"{}\" fill=\"#56B8D8\"/>",
            p.id.get(),
            dot.to_svg()
        )?;
    }
    out.push_str("</svg>\n");
    print!("{out}");
    Ok(())
}
