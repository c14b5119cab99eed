/*!
# Graph Store

[`Graph`] is the single graph representation of this crate. It is generic over
- the vertex identifier `V` (any [`VertexId`]),
- an optional vertex property `VP`,
- an optional edge property `EP` (a weight if `EP: Weighted`),
- the [`Direction`] `D` ([`Directed`] or [`Undirected`]).

Vertices are stored in an arena: the `i`-th inserted vertex gets the handle `Node = i`,
and the `j`-th inserted edge gets the handle `EdgeId = j`. Neighborhoods store
`(neighbor, edge id)` pairs so that weighted algorithms can look up edge properties
without hashing. Properties live in [`PropertyStore`]s beside the topology.

Undirected edges are stored once, as given, but appear in the neighborhood of both
endpoints (a self-loop appears once). Duplicate detection normalizes undirected edges.

# Examples
```
use pgraphs::prelude::*;

let mut g: UnGraph<&str, (), u32> = UnGraph::new();
g.add_vertex("a").unwrap();
g.add_vertex("b").unwrap();
g.add_edge_with(&"a", &"b", 3).unwrap();

assert!(g.add_edge(&"b", &"a").is_err()); // same undirected edge
assert_eq!(g.edge_property(&"b", &"a").unwrap(), Some(&3));
assert_eq!(g.neighbours(&"b").unwrap().collect::<Vec<_>>(), vec![&"a"]);
```
*/

use std::marker::PhantomData;

use fxhash::FxHashMap;
use tracing::debug;

use crate::{error::*, prelude::*, weight::Weighted};

mod property;
mod reversed;

pub use property::*;
pub use reversed::*;

/// Property-annotated graph over vertex identifiers `V`
#[derive(Debug, Clone)]
pub struct Graph<V, VP = (), EP = (), D = Directed> {
    labels: Vec<V>,
    index: FxHashMap<V, Node>,
    out_nbs: Vec<Vec<(Node, EdgeId)>>,
    in_nbs: Vec<Vec<(Node, EdgeId)>>,
    edges: Vec<Edge>,
    edge_index: FxHashMap<Edge, EdgeId>,
    vertex_props: PropertyStore<VP>,
    edge_props: PropertyStore<EP>,
    _dir: PhantomData<D>,
}

/// Directed graph
pub type DiGraph<V, VP = (), EP = ()> = Graph<V, VP, EP, Directed>;

/// Undirected graph
pub type UnGraph<V, VP = (), EP = ()> = Graph<V, VP, EP, Undirected>;

impl<V, VP, EP, D> Default for Graph<V, VP, EP, D> {
    fn default() -> Self {
        Self {
            labels: Vec::new(),
            index: FxHashMap::default(),
            out_nbs: Vec::new(),
            in_nbs: Vec::new(),
            edges: Vec::new(),
            edge_index: FxHashMap::default(),
            vertex_props: PropertyStore::new(),
            edge_props: PropertyStore::new(),
            _dir: PhantomData,
        }
    }
}

impl<V, VP, EP, D> Graph<V, VP, EP, D>
where
    V: VertexId,
    D: Direction,
{
    /// Creates a graph without vertices
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a graph with an initial vertex set and no edges.
    /// Fails on the first duplicate identifier.
    pub fn with_vertices<I>(ids: I) -> Result<Self, V>
    where
        I: IntoIterator<Item = V>,
    {
        let mut graph = Self::new();
        for id in ids {
            graph.add_vertex(id)?;
        }
        Ok(graph)
    }

    /// Creates a graph from a list of edges; vertices are inserted in order of
    /// their first appearance. Fails on the first duplicate edge.
    pub fn from_edges<I>(edges: I) -> Result<Self, V>
    where
        I: IntoIterator<Item = (V, V)>,
    {
        let mut graph = Self::new();
        for (u, v) in edges {
            graph.vertex_or_insert(u.clone());
            graph.vertex_or_insert(v.clone());
            graph.add_edge(&u, &v)?;
        }
        Ok(graph)
    }

    /// Same as [`Graph::from_edges`] with a property attached to every edge
    pub fn from_edges_with<I>(edges: I) -> Result<Self, V>
    where
        I: IntoIterator<Item = (V, V, EP)>,
    {
        let mut graph = Self::new();
        for (u, v, property) in edges {
            graph.vertex_or_insert(u.clone());
            graph.vertex_or_insert(v.clone());
            graph.add_edge_with(&u, &v, property)?;
        }
        Ok(graph)
    }

    /// Adds a vertex without property and returns its handle
    pub fn add_vertex(&mut self, id: V) -> Result<Node, V> {
        self.insert_vertex(id, None)
    }

    /// Adds a vertex with a property and returns its handle
    pub fn add_vertex_with(&mut self, id: V, property: VP) -> Result<Node, V> {
        self.insert_vertex(id, Some(property))
    }

    /// Returns the handle of `id`, inserting the vertex (without property) if necessary
    pub fn vertex_or_insert(&mut self, id: V) -> Node {
        match self.index.get(&id) {
            Some(&u) => u,
            None => self.push_vertex(id, None),
        }
    }

    fn insert_vertex(&mut self, id: V, property: Option<VP>) -> Result<Node, V> {
        if self.index.contains_key(&id) {
            return Err(GraphError::DuplicateVertex(id));
        }
        Ok(self.push_vertex(id, property))
    }

    fn push_vertex(&mut self, id: V, property: Option<VP>) -> Node {
        let u = self.labels.len() as Node;
        self.index.insert(id.clone(), u);
        self.labels.push(id);
        self.out_nbs.push(Vec::new());
        self.in_nbs.push(Vec::new());
        self.vertex_props.push(property);
        u
    }

    /// Adds the edge `(source, destination)` without property
    pub fn add_edge(&mut self, source: &V, destination: &V) -> Result<Edge, V> {
        self.insert_edge(source, destination, None)
    }

    /// Adds the edge `(source, destination)` with a property
    pub fn add_edge_with(&mut self, source: &V, destination: &V, property: EP) -> Result<Edge, V> {
        self.insert_edge(source, destination, Some(property))
    }

    fn insert_edge(&mut self, source: &V, destination: &V, property: Option<EP>) -> Result<Edge, V> {
        let u = self.try_node_of(source)?;
        let v = self.try_node_of(destination)?;

        if self.connect(u, v, property).is_none() {
            return Err(GraphError::DuplicateEdge(
                source.clone(),
                destination.clone(),
            ));
        }

        Ok(Edge(u, v))
    }

    /// Inserts the edge `(u, v)` unless it already exists; returns the new edge id
    fn connect(&mut self, u: Node, v: Node, property: Option<EP>) -> Option<EdgeId> {
        let key = Self::edge_key(u, v);
        if self.edge_index.contains_key(&key) {
            return None;
        }

        let id = self.edges.len() as EdgeId;
        self.edge_index.insert(key, id);
        self.edges.push(Edge(u, v));
        self.edge_props.push(property);

        self.out_nbs[u as usize].push((v, id));
        if D::is_directed() {
            self.in_nbs[v as usize].push((u, id));
        } else if u != v {
            self.out_nbs[v as usize].push((u, id));
        }

        Some(id)
    }

    fn edge_key(u: Node, v: Node) -> Edge {
        if D::is_directed() {
            Edge(u, v)
        } else {
            Edge(u, v).normalized()
        }
    }

    /// Returns the id of the edge `(u, v)` (either orientation if undirected)
    pub fn edge_id(&self, u: Node, v: Node) -> Option<EdgeId> {
        self.edge_index.get(&Self::edge_key(u, v)).copied()
    }

    fn try_edge_id(&self, source: &V, destination: &V) -> Result<EdgeId, V> {
        let u = self.try_node_of(source)?;
        let v = self.try_node_of(destination)?;
        self.edge_id(u, v)
            .ok_or_else(|| GraphError::UnknownEdge(source.clone(), destination.clone()))
    }

    /// Returns the endpoints of an edge as stored
    /// ** Panics if `id >= m` **
    pub fn edge(&self, id: EdgeId) -> Edge {
        self.edges[id as usize]
    }

    /// Returns *true* if a vertex with this identifier exists
    pub fn contains_vertex(&self, id: &V) -> bool {
        self.index.contains_key(id)
    }

    /// Returns *true* if the edge exists (either orientation if undirected)
    pub fn contains_edge(&self, source: &V, destination: &V) -> bool {
        self.try_edge_id(source, destination).is_ok()
    }

    /// Iterates over all vertex identifiers in insertion order
    pub fn ids(&self) -> impl Iterator<Item = &V> + '_ {
        self.labels.iter()
    }

    /// Iterates over all edges as stored, in insertion order
    pub fn edge_list(&self) -> impl Iterator<Item = (&V, &V)> + '_ {
        self.edges
            .iter()
            .map(|&Edge(u, v)| (&self.labels[u as usize], &self.labels[v as usize]))
    }

    /// Iterates over the neighbours of a vertex: the heads of its outgoing edges if
    /// directed, all adjacent vertices if undirected
    pub fn neighbours<'a>(
        &'a self,
        id: &V,
    ) -> Result<impl Iterator<Item = &'a V> + use<'a, V, VP, EP, D>, V> {
        let u = self.try_node_of(id)?;
        Ok(self.out_nbs[u as usize]
            .iter()
            .map(|&(v, _)| &self.labels[v as usize]))
    }

    /// Iterates over the edges leaving a vertex (all incident edges if undirected),
    /// each reported as stored
    pub fn adjacent_edges<'a>(
        &'a self,
        id: &V,
    ) -> Result<impl Iterator<Item = (&'a V, &'a V)> + use<'a, V, VP, EP, D>, V> {
        let u = self.try_node_of(id)?;
        Ok(self.out_nbs[u as usize].iter().map(|&(_, e)| {
            let Edge(a, b) = self.edges[e as usize];
            (&self.labels[a as usize], &self.labels[b as usize])
        }))
    }

    /// Returns the number of outgoing edges (incident edges if undirected)
    pub fn out_degree(&self, id: &V) -> Result<NumNodes, V> {
        let u = self.try_node_of(id)?;
        Ok(self.out_nbs[u as usize].len() as NumNodes)
    }

    /// Returns the number of incoming edges (incident edges if undirected)
    pub fn in_degree(&self, id: &V) -> Result<NumNodes, V> {
        let u = self.try_node_of(id)? as usize;
        let degree = if D::is_directed() {
            self.in_nbs[u].len()
        } else {
            self.out_nbs[u].len()
        };
        Ok(degree as NumNodes)
    }

    /// Returns the property of a vertex, `Ok(None)` if it has none
    pub fn vertex_property(&self, id: &V) -> Result<Option<&VP>, V> {
        let u = self.try_node_of(id)?;
        Ok(self.vertex_props.get(u as usize))
    }

    /// Assigns a property to a vertex and returns the previous one
    pub fn set_vertex_property(&mut self, id: &V, property: VP) -> Result<Option<VP>, V> {
        let u = self.try_node_of(id)?;
        Ok(self.vertex_props.set(u as usize, property))
    }

    /// Returns the property of an edge, `Ok(None)` if it has none
    pub fn edge_property(&self, source: &V, destination: &V) -> Result<Option<&EP>, V> {
        let id = self.try_edge_id(source, destination)?;
        Ok(self.edge_props.get(id as usize))
    }

    /// Assigns a property to an edge and returns the previous one
    pub fn set_edge_property(
        &mut self,
        source: &V,
        destination: &V,
        property: EP,
    ) -> Result<Option<EP>, V> {
        let id = self.try_edge_id(source, destination)?;
        Ok(self.edge_props.set(id as usize, property))
    }

    /// Read access to the vertex properties, indexed by node
    pub fn vertex_properties(&self) -> &PropertyStore<VP> {
        &self.vertex_props
    }

    /// Read access to the edge properties, indexed by edge id
    pub fn edge_properties(&self) -> &PropertyStore<EP> {
        &self.edge_props
    }
}

impl<V, VP, EP> Graph<V, VP, EP, Directed>
where
    V: VertexId,
{
    /// Flips every edge in place. Vertex properties are untouched; every edge
    /// property moves with its edge.
    pub fn reverse(&mut self) {
        std::mem::swap(&mut self.out_nbs, &mut self.in_nbs);
        for e in self.edges.iter_mut() {
            *e = e.reverse();
        }
        self.edge_index = self
            .edges
            .iter()
            .enumerate()
            .map(|(id, &e)| (e, id as EdgeId))
            .collect();

        debug!(
            nodes = self.number_of_nodes(),
            edges = self.number_of_edges(),
            "reversed graph"
        );
    }

    /// Returns an independent copy with every edge flipped
    pub fn reversed(&self) -> Self
    where
        VP: Clone,
        EP: Clone,
    {
        let mut graph = self.clone();
        graph.reverse();
        graph
    }

    /// Returns a zero-copy view with every edge flipped
    pub fn reversed_view(&self) -> Reversed<'_, Self> {
        Reversed::new(self)
    }
}

impl<V, VP, EP> Graph<V, VP, EP, Undirected>
where
    V: VertexId,
    VP: Clone,
    EP: Clone,
{
    /// Returns a directed copy in which every undirected edge `{u, v}` becomes the
    /// two edges `(u, v)` and `(v, u)` with the same property
    pub fn as_directed(&self) -> DiGraph<V, VP, EP> {
        self.as_directed_with(EP::clone)
    }

    /// Like [`Graph::as_directed`], but the edge opposite to the stored orientation
    /// receives `backward(property)`; a self-loop yields a single directed loop
    pub fn as_directed_with<F>(&self, mut backward: F) -> DiGraph<V, VP, EP>
    where
        F: FnMut(&EP) -> EP,
    {
        let mut directed = DiGraph::new();
        for (u, id) in self.labels.iter().enumerate() {
            directed.push_vertex(id.clone(), self.vertex_props.get(u).cloned());
        }

        for (id, &Edge(u, v)) in self.edges.iter().enumerate() {
            let property = self.edge_props.get(id);
            directed.connect(u, v, property.cloned());
            if u != v {
                directed.connect(v, u, property.map(&mut backward));
            }
        }

        debug!(
            nodes = directed.number_of_nodes(),
            edges = directed.number_of_edges(),
            "expanded undirected graph"
        );

        directed
    }
}

impl<V, VP, EP, D> GraphType for Graph<V, VP, EP, D>
where
    D: Direction,
{
    type Dir = D;
}

impl<V, VP, EP, D> GraphNodeOrder for Graph<V, VP, EP, D> {
    fn number_of_nodes(&self) -> NumNodes {
        self.labels.len() as NumNodes
    }
}

impl<V, VP, EP, D> GraphEdgeOrder for Graph<V, VP, EP, D> {
    fn number_of_edges(&self) -> NumEdges {
        self.edges.len() as NumEdges
    }
}

impl<V, VP, EP, D> AdjacencyList for Graph<V, VP, EP, D> {
    fn neighbors_of(&self, u: Node) -> impl Iterator<Item = Node> + '_ {
        self.out_nbs[u as usize].iter().map(|&(v, _)| v)
    }

    fn degree_of(&self, u: Node) -> NumNodes {
        self.out_nbs[u as usize].len() as NumNodes
    }
}

impl<V, VP, EP> DirectedAdjacencyList for Graph<V, VP, EP, Directed> {
    fn in_neighbors_of(&self, u: Node) -> impl Iterator<Item = Node> + '_ {
        self.in_nbs[u as usize].iter().map(|&(v, _)| v)
    }

    fn in_degree_of(&self, u: Node) -> NumNodes {
        self.in_nbs[u as usize].len() as NumNodes
    }
}

impl<V, VP, EP, D> AdjacencyTest for Graph<V, VP, EP, D>
where
    V: VertexId,
    D: Direction,
{
    fn has_edge(&self, u: Node, v: Node) -> bool {
        self.edge_id(u, v).is_some()
    }
}

impl<V, VP, EP, D> Labelled for Graph<V, VP, EP, D>
where
    V: VertexId,
{
    type Label = V;

    fn label_of(&self, u: Node) -> &V {
        &self.labels[u as usize]
    }

    fn node_of(&self, label: &V) -> Option<Node> {
        self.index.get(label).copied()
    }
}

impl<V, VP, EP, D> WeightedAdjacencyList for Graph<V, VP, EP, D>
where
    V: VertexId,
    EP: Weighted,
{
    type Weight = EP::Weight;

    fn weighted_neighbors_of(
        &self,
        u: Node,
    ) -> impl Iterator<Item = (Node, Option<Self::Weight>)> + '_ {
        self.out_nbs[u as usize]
            .iter()
            .map(|&(v, id)| (v, self.edge_props.get(id as usize).map(EP::weight)))
    }
}
