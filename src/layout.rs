use std::f32::consts::TAU;

use eframe::egui::{Pos2, Vec2, vec2};
use tracing::debug;

use crate::graph::{Edge, KnowledgeGraph};

pub const LAYOUT_ITERATIONS: usize = 50;

const INITIAL_RADIUS_RATIO: f32 = 0.35;
const REPULSION_STRENGTH: f32 = 1000.0;
const ATTRACTION_STRENGTH: f32 = 0.01;
/// Per-endpoint pull at which a pair would swap past each other by at least
/// its current separation, so repeated sweeps no longer shrink it.
const DIVERGENT_ATTRACTION_FRACTION: f32 = 1.0;
const MIDPOINT_FRACTION: f32 = 0.5;
const CENTER_GRAVITY: f32 = 0.01;
const MIN_DISTANCE: f32 = 1.0;
const COINCIDENT_EPSILON: f32 = 0.0001;

/// Positions every node of `graph` for a canvas of `canvas` logical units.
///
/// Starts from the circular placement and runs a fixed schedule of
/// [`LAYOUT_ITERATIONS`] sweeps. Within a sweep each force is applied to the
/// positions immediately, so later pairs see the displacement of earlier ones.
/// The result depends only on node order, edges and the canvas extent.
pub fn layout_graph(graph: &mut KnowledgeGraph, canvas: Vec2) {
    let canvas = sanitize_extent(canvas);
    let positions = force_layout(graph.nodes.len(), &graph.edges, canvas, LAYOUT_ITERATIONS);
    for (node, position) in graph.nodes.iter_mut().zip(positions) {
        node.position = position;
    }
}

pub fn initial_positions(node_count: usize, canvas: Vec2) -> Vec<Pos2> {
    let center = (canvas * 0.5).to_pos2();
    let radius = INITIAL_RADIUS_RATIO * canvas.x.min(canvas.y);
    (0..node_count)
        .map(|index| {
            let angle = TAU * index as f32 / node_count as f32;
            center + vec2(angle.cos(), angle.sin()) * radius
        })
        .collect()
}

pub fn force_layout(
    node_count: usize,
    edges: &[Edge],
    canvas: Vec2,
    iterations: usize,
) -> Vec<Pos2> {
    if node_count == 0 {
        return Vec::new();
    }

    let mut positions = initial_positions(node_count, canvas);
    if node_count == 1 {
        return positions;
    }

    let center = (canvas * 0.5).to_pos2();
    for _ in 0..iterations {
        apply_repulsion(&mut positions);
        apply_attraction(&mut positions, edges);
        apply_center_gravity(&mut positions, center);
    }

    let mut reset = 0usize;
    for position in &mut positions {
        if !position.x.is_finite() || !position.y.is_finite() {
            *position = center;
            reset += 1;
        }
    }
    debug!(node_count, edges = edges.len(), iterations, reset, "force layout finished");

    positions
}

fn apply_repulsion(positions: &mut [Pos2]) {
    let n = positions.len();
    for i in 0..n {
        for j in (i + 1)..n {
            let delta = positions[i] - positions[j];
            let distance = delta.length().max(MIN_DISTANCE);
            let direction = pair_direction(delta, distance, i, j);
            let push = direction * (REPULSION_STRENGTH / (distance * distance));

            positions[i] += push;
            positions[j] -= push;
        }
    }
}

fn apply_attraction(positions: &mut [Pos2], edges: &[Edge]) {
    let n = positions.len();
    for edge in edges {
        let (from, to) = (edge.from, edge.to);
        if from >= n || to >= n || from == to {
            continue;
        }

        let delta = positions[to] - positions[from];
        let length = delta.length();
        if length <= COINCIDENT_EPSILON {
            continue;
        }
        let distance = length.max(MIN_DISTANCE);
        let fraction = attraction_fraction(edge.weight);
        let pull = delta / distance * (distance * fraction);

        positions[from] += pull;
        positions[to] -= pull;
    }
}

fn attraction_fraction(weight: u32) -> f32 {
    let fraction = ATTRACTION_STRENGTH * weight as f32;
    if fraction < DIVERGENT_ATTRACTION_FRACTION {
        fraction
    } else {
        MIDPOINT_FRACTION
    }
}

fn apply_center_gravity(positions: &mut [Pos2], center: Pos2) {
    for position in positions {
        *position += (center - *position) * CENTER_GRAVITY;
    }
}

fn pair_direction(delta: Vec2, distance: f32, i: usize, j: usize) -> Vec2 {
    if delta.length() > COINCIDENT_EPSILON {
        delta / distance
    } else {
        let angle = ((i as f32) * 0.618_034 + (j as f32) * 0.414_214) * TAU;
        vec2(angle.cos(), angle.sin())
    }
}

fn sanitize_extent(canvas: Vec2) -> Vec2 {
    let clamp = |value: f32| if value.is_finite() { value.max(0.0) } else { 0.0 };
    vec2(clamp(canvas.x), clamp(canvas.y))
}

#[cfg(test)]
mod tests {
    use eframe::egui::pos2;
    use rstest::rstest;

    use super::*;
    use crate::graph::build_graph;
    use crate::records::{KnowledgeSource, MemoryItem};

    fn source(id: &str, tags: &[&str]) -> KnowledgeSource {
        KnowledgeSource {
            id: id.to_owned(),
            title: id.to_owned(),
            tags: Some(tags.iter().map(|tag| (*tag).to_owned()).collect()),
            ..KnowledgeSource::default()
        }
    }

    fn sample_graph() -> KnowledgeGraph {
        let knowledge = [
            source("a", &["ia", "rust"]),
            source("b", &["ia"]),
            source("c", &["rust", "web"]),
            source("d", &["web"]),
            source("e", &[]),
        ];
        let memories = [MemoryItem {
            id: "m".to_owned(),
            content: "prefers concise answers".to_owned(),
            tags: Some(vec!["ia".to_owned(), "web".to_owned()]),
            importance: 8.0,
        }];
        build_graph(&knowledge, &memories)
    }

    fn assert_all_finite(graph: &KnowledgeGraph) {
        for node in &graph.nodes {
            assert!(
                node.position.x.is_finite() && node.position.y.is_finite(),
                "{} has non-finite position {:?}",
                node.id,
                node.position
            );
        }
    }

    #[test]
    fn single_node_stays_at_angle_zero() {
        let mut graph = build_graph(&[source("solo", &[])], &[]);

        layout_graph(&mut graph, vec2(800.0, 600.0));

        assert_eq!(graph.nodes[0].position, pos2(400.0 + 0.35 * 600.0, 300.0));
    }

    #[test]
    fn initial_placement_spaces_nodes_on_circle() {
        let positions = initial_positions(4, vec2(400.0, 200.0));

        let center = pos2(200.0, 100.0);
        for position in &positions {
            assert!((position.distance(center) - 70.0).abs() < 1e-3);
        }
        assert!((positions[0] - pos2(270.0, 100.0)).length() < 1e-3);
        assert!((positions[1] - pos2(200.0, 170.0)).length() < 1e-3);
    }

    #[test]
    fn layout_is_deterministic() {
        let mut first = sample_graph();
        let mut second = sample_graph();

        layout_graph(&mut first, vec2(640.0, 480.0));
        layout_graph(&mut second, vec2(640.0, 480.0));

        for (a, b) in first.nodes.iter().zip(&second.nodes) {
            assert_eq!(a.position.x.to_bits(), b.position.x.to_bits());
            assert_eq!(a.position.y.to_bits(), b.position.y.to_bits());
        }
    }

    #[test]
    fn layout_restarts_from_initial_placement() {
        let mut graph = sample_graph();
        layout_graph(&mut graph, vec2(640.0, 480.0));
        let once = graph.nodes.iter().map(|n| n.position).collect::<Vec<_>>();

        layout_graph(&mut graph, vec2(640.0, 480.0));
        let twice = graph.nodes.iter().map(|n| n.position).collect::<Vec<_>>();

        assert_eq!(once, twice);
    }

    #[test]
    fn connected_nodes_end_closer_than_unconnected() {
        let mut graph = build_graph(
            &[
                source("a", &["x", "y", "z"]),
                source("b", &["x", "y", "z"]),
                source("c", &[]),
                source("d", &[]),
            ],
            &[],
        );

        layout_graph(&mut graph, vec2(800.0, 800.0));

        let linked = graph.nodes[0].position.distance(graph.nodes[1].position);
        let unlinked = graph.nodes[2].position.distance(graph.nodes[3].position);
        assert!(linked < unlinked, "linked {linked} unlinked {unlinked}");
    }

    #[rstest]
    #[case(vec2(0.0, 0.0))]
    #[case(vec2(1.0, 1.0))]
    #[case(vec2(f32::NAN, 300.0))]
    #[case(vec2(f32::INFINITY, -20.0))]
    fn degenerate_canvas_stays_finite(#[case] canvas: Vec2) {
        let mut graph = sample_graph();

        layout_graph(&mut graph, canvas);

        assert_all_finite(&graph);
    }

    #[test]
    fn coincident_nodes_are_separated() {
        let mut positions = vec![pos2(50.0, 50.0); 3];

        apply_repulsion(&mut positions);

        assert!(positions[0].distance(positions[1]) > 1.0);
        assert!(positions.iter().all(|p| p.x.is_finite() && p.y.is_finite()));
    }

    #[test]
    fn heavy_edges_do_not_diverge() {
        let tags = (0..200).map(|i| format!("t{i}")).collect::<Vec<_>>();
        let tag_refs = tags.iter().map(String::as_str).collect::<Vec<_>>();
        let mut graph = build_graph(&[source("a", &tag_refs), source("b", &tag_refs)], &[]);
        assert_eq!(graph.edges[0].weight, 200);

        layout_graph(&mut graph, vec2(500.0, 500.0));

        assert_all_finite(&graph);
        for node in &graph.nodes {
            assert!(node.position.distance(pos2(250.0, 250.0)) < 500.0);
        }
    }

    fn edge(weight: u32) -> Edge {
        Edge {
            from: 0,
            to: 1,
            weight,
            shared_tags: Default::default(),
        }
    }

    #[rstest]
    #[case(10, 10.0, 90.0)]
    #[case(80, 80.0, 20.0)]
    #[case(99, 99.0, 1.0)]
    #[case(101, 50.0, 50.0)]
    #[case(400, 50.0, 50.0)]
    fn attraction_is_literal_until_it_would_diverge(
        #[case] weight: u32,
        #[case] from_x: f32,
        #[case] to_x: f32,
    ) {
        let mut positions = vec![pos2(0.0, 0.0), pos2(100.0, 0.0)];

        apply_attraction(&mut positions, &[edge(weight)]);

        assert!((positions[0].x - from_x).abs() < 1e-3, "{:?}", positions[0]);
        assert!((positions[1].x - to_x).abs() < 1e-3, "{:?}", positions[1]);
    }

    #[test]
    fn empty_graph_is_a_no_op() {
        let mut graph = KnowledgeGraph::default();
        layout_graph(&mut graph, vec2(100.0, 100.0));
        assert!(graph.nodes.is_empty());
    }
}
