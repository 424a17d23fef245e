use arcstr::ArcStr;
use serde::{Serialize, Serializer};
use unchunk_common::{ChunkId, ModuleId};
use unchunk_utils::indexmap::FxIndexMap;

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct GraphNode {
  pub chunk_id: Option<ChunkId>,
  pub is_commonjs: bool,
  /// `false` while the module is only known from references, i.e. its chunk wasn't unpacked.
  pub declared: bool,
  pub source: Option<ArcStr>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GraphEdge<'a> {
  pub importer: &'a ModuleId,
  pub importee: &'a ModuleId,
  /// How many require sites of `importer` point at `importee`.
  pub count: u32,
}

/// Modules and their require edges, accumulated across chunks.
///
/// Nodes and edges keep their first insertion order, so the graph serializes the same way for
/// the same input.
#[derive(Debug, Default, Clone)]
pub struct DependencyGraph {
  nodes: FxIndexMap<ModuleId, GraphNode>,
  edges: FxIndexMap<(ModuleId, ModuleId), u32>,
}

impl DependencyGraph {
  pub fn new() -> Self {
    Self::default()
  }

  /// Declares `id`. A node that was only referenced so far becomes declared, attributes of an
  /// already declared node are merged.
  pub fn add_module(
    &mut self,
    id: ModuleId,
    chunk_id: Option<ChunkId>,
    is_commonjs: bool,
    source: Option<ArcStr>,
  ) {
    let node = self.nodes.entry(id).or_default();
    node.declared = true;
    node.is_commonjs |= is_commonjs;
    if chunk_id.is_some() {
      node.chunk_id = chunk_id;
    }
    if source.is_some() {
      node.source = source;
    }
  }

  /// Records one reference from `importer` to `importee`, creating missing endpoints as
  /// undeclared nodes.
  pub fn add_edge(&mut self, importer: &ModuleId, importee: &ModuleId) {
    self.add_edge_with_count(importer, importee, 1);
  }

  fn add_edge_with_count(&mut self, importer: &ModuleId, importee: &ModuleId, count: u32) {
    for id in [importer, importee] {
      if !self.nodes.contains_key(id) {
        self.nodes.insert(id.clone(), GraphNode::default());
      }
    }
    *self.edges.entry((importer.clone(), importee.clone())).or_default() += count;
  }

  pub fn set_source(&mut self, id: &ModuleId, source: ArcStr) {
    if let Some(node) = self.nodes.get_mut(id) {
      node.source = Some(source);
    }
  }

  /// Folds `other` into `self`.
  pub fn merge(&mut self, other: DependencyGraph) {
    for (id, node) in other.nodes {
      if node.declared {
        self.add_module(id, node.chunk_id, node.is_commonjs, node.source);
      } else if !self.nodes.contains_key(&id) {
        self.nodes.insert(id, node);
      }
    }
    for ((importer, importee), count) in other.edges {
      self.add_edge_with_count(&importer, &importee, count);
    }
  }

  #[inline]
  pub fn node(&self, id: &str) -> Option<&GraphNode> {
    self.nodes.get(id)
  }

  pub fn nodes(&self) -> impl Iterator<Item = (&ModuleId, &GraphNode)> {
    self.nodes.iter()
  }

  pub fn edges(&self) -> impl Iterator<Item = GraphEdge<'_>> {
    self.edges.iter().map(|((importer, importee), count)| GraphEdge {
      importer,
      importee,
      count: *count,
    })
  }

  /// Modules that are required somewhere but were never found in an unpacked chunk.
  pub fn undeclared_modules(&self) -> Vec<&ModuleId> {
    self.nodes.iter().filter(|(_, node)| !node.declared).map(|(id, _)| id).collect()
  }
}

impl Serialize for DependencyGraph {
  fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
    #[derive(Serialize)]
    struct NodeView<'a> {
      id: &'a ModuleId,
      #[serde(skip_serializing_if = "Option::is_none")]
      chunk_id: Option<&'a ChunkId>,
      is_commonjs: bool,
      declared: bool,
    }

    #[derive(Serialize)]
    struct GraphView<'a> {
      nodes: Vec<NodeView<'a>>,
      edges: Vec<GraphEdge<'a>>,
    }

    GraphView {
      nodes: self
        .nodes
        .iter()
        .map(|(id, node)| NodeView {
          id,
          chunk_id: node.chunk_id.as_ref(),
          is_commonjs: node.is_commonjs,
          declared: node.declared,
        })
        .collect(),
      edges: self.edges().collect(),
    }
    .serialize(serializer)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn id(value: &str) -> ModuleId {
    ModuleId::new(value)
  }

  #[test]
  fn referenced_nodes_become_declared() {
    let mut graph = DependencyGraph::new();
    graph.add_module(id("1"), Some(ChunkId::Int(10)), false, None);
    graph.add_edge(&id("1"), &id("2"));
    graph.add_edge(&id("1"), &id("3"));
    graph.add_edge(&id("1"), &id("2"));
    assert_eq!(graph.undeclared_modules(), [&id("2"), &id("3")]);

    graph.add_module(id("2"), Some(ChunkId::Int(11)), true, None);
    assert_eq!(graph.undeclared_modules(), [&id("3")]);
    let node = graph.node("2").unwrap();
    assert!(node.declared && node.is_commonjs);

    let edges = graph.edges().map(|edge| (&**edge.importee, edge.count)).collect::<Vec<_>>();
    assert_eq!(edges, [("2", 2), ("3", 1)]);
  }

  #[test]
  fn merge_keeps_declarations_and_counts() {
    let mut shared = DependencyGraph::new();
    shared.add_edge(&id("a"), &id("b"));

    let mut chunk = DependencyGraph::new();
    chunk.add_module(id("b"), Some(ChunkId::from("vendors")), false, Some("x".into()));
    chunk.add_edge(&id("a"), &id("b"));
    chunk.add_edge(&id("b"), &id("c"));
    shared.merge(chunk);

    assert_eq!(shared.node("b").and_then(|node| node.chunk_id.clone()), Some("vendors".into()));
    assert_eq!(shared.undeclared_modules(), [&id("a"), &id("c")]);
    let counts = shared.edges().map(|edge| edge.count).collect::<Vec<_>>();
    assert_eq!(counts, [2, 1]);
  }

  #[test]
  fn serializes_without_sources() {
    let mut graph = DependencyGraph::new();
    graph.add_module(id("1"), Some(ChunkId::Int(5)), false, Some("export {};".into()));
    graph.add_edge(&id("1"), &id("react"));
    let json = serde_json::to_value(&graph).unwrap();
    assert_eq!(
      json,
      serde_json::json!({
        "nodes": [
          { "id": "1", "chunk_id": 5, "is_commonjs": false, "declared": true },
          { "id": "react", "is_commonjs": false, "declared": false }
        ],
        "edges": [{ "importer": "1", "importee": "react", "count": 1 }]
      })
    );
  }
}
