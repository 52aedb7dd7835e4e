//! Derived relation engine: edges, facets, adjacency, and boundary queries.
//!
//! Nothing in this module is stored persistently. Every relation is computed
//! from the arena and its incidence index, deduplicated by canonical
//! identity. The boundary set is transparently cached in a `OnceCell` and
//! invalidated on mutation; caching is an optimization, not an observable
//! contract.

use std::collections::{BTreeSet, HashMap};

use itertools::Itertools;

use crate::mesh_error::MeshTopoError;
use crate::topology::arena::SimplicialTopology;
use crate::topology::element::{Edge, Facet};
use crate::topology::handle::{CellId, VertexId};

/// Cached boundary scan result.
#[derive(Clone, Debug)]
pub(crate) struct BoundaryCache {
    pub(crate) facets: Vec<Facet>,
    pub(crate) vertices: Vec<VertexId>,
}

impl<V> SimplicialTopology<V> {
    /// All `C(dim+1, 2)` edges of a cell, in fixed `(i < j)` index-pair order.
    pub fn cell_edges(&self, cell: CellId) -> Result<Vec<Edge>, MeshTopoError> {
        let verts = self.cell_vertices(cell)?;
        Ok(verts
            .iter()
            .tuple_combinations()
            .map(|(&a, &b)| Edge::new(a, b))
            .collect())
    }

    /// All `dim + 1` facets of a cell, in ascending order of the omitted
    /// vertex position.
    ///
    /// The position index doubles as the facet's *side tag* during segment
    /// classification.
    pub fn cell_facets(&self, cell: CellId) -> Result<Vec<Facet>, MeshTopoError> {
        let verts = self.cell_vertices(cell)?;
        Ok((0..verts.len())
            .map(|omit| {
                Facet::from_vertices(
                    verts
                        .iter()
                        .enumerate()
                        .filter_map(|(i, &v)| (i != omit).then_some(v)),
                )
            })
            .collect())
    }

    /// Cells incident to a facet, ascending.
    ///
    /// Intersects the incidence sets of the facet's vertices, starting from
    /// the vertex with the smallest incidence set; `O(min-degree * dim)`.
    /// A facet whose vertices touch no common cell yields an empty result.
    pub fn facet_cells(&self, facet: &Facet) -> Result<Vec<CellId>, MeshTopoError> {
        if facet.arity() != self.dim() {
            return Err(MeshTopoError::DimensionMismatch {
                expected: self.dim(),
                found: facet.arity(),
            });
        }
        let mut seed = None;
        for &v in facet.vertices() {
            let incident = self.cells_of_vertex(v)?;
            match seed {
                Some((_, n)) if n <= incident.len() => {}
                _ => seed = Some((v, incident.len())),
            }
        }
        let Some((seed, _)) = seed else {
            return Ok(Vec::new());
        };
        let mut cells: Vec<CellId> = self
            .cells_of_vertex(seed)?
            .iter()
            .copied()
            .filter(|&c| {
                let verts = &self.conn
                    [c.index() * self.cell_arity()..(c.index() + 1) * self.cell_arity()];
                facet.vertices().iter().all(|v| verts.contains(v))
            })
            .collect();
        cells.sort_unstable();
        Ok(cells)
    }

    /// True iff the facet is touched by exactly one cell.
    ///
    /// A facet touched by three or more cells breaks the simplicial-complex
    /// invariant and surfaces `InconsistentIncidence`.
    pub fn is_boundary_facet(&self, facet: &Facet) -> Result<bool, MeshTopoError> {
        let incident = self.facet_cells(facet)?.len();
        if incident > 2 {
            return Err(MeshTopoError::InconsistentIncidence(format!(
                "facet {facet} touched by {incident} cells"
            )));
        }
        Ok(incident == 1)
    }

    /// All boundary facets, in canonical ascending order.
    pub fn boundary_facets(&self) -> Result<&[Facet], MeshTopoError> {
        self.boundary_cache().map(|c| c.facets.as_slice())
    }

    /// Union of the vertices of all boundary facets, ascending.
    pub fn boundary_vertices(&self) -> Result<&[VertexId], MeshTopoError> {
        self.boundary_cache().map(|c| c.vertices.as_slice())
    }

    /// Edges incident to a vertex, deduplicated, ascending.
    pub fn vertex_edges(&self, vertex: VertexId) -> Result<Vec<Edge>, MeshTopoError> {
        let mut edges = BTreeSet::new();
        for &cell in self.cells_of_vertex(vertex)? {
            for edge in self.cell_edges(cell)? {
                if edge.contains(vertex) {
                    edges.insert(edge);
                }
            }
        }
        Ok(edges.into_iter().collect())
    }

    /// Facets incident to a vertex, deduplicated, ascending.
    pub fn vertex_facets(&self, vertex: VertexId) -> Result<Vec<Facet>, MeshTopoError> {
        let mut facets = BTreeSet::new();
        for &cell in self.cells_of_vertex(vertex)? {
            for facet in self.cell_facets(cell)? {
                if facet.contains(vertex) {
                    facets.insert(facet);
                }
            }
        }
        Ok(facets.into_iter().collect())
    }

    /// Facets containing both endpoints of an edge, deduplicated, ascending.
    pub fn edge_facets(&self, edge: &Edge) -> Result<Vec<Facet>, MeshTopoError> {
        let [lo, hi] = edge.vertices();
        self.vertex_slot(hi)?;
        let mut facets = BTreeSet::new();
        for &cell in self.cells_of_vertex(lo)? {
            for facet in self.cell_facets(cell)? {
                if facet.contains_edge(edge) {
                    facets.insert(facet);
                }
            }
        }
        Ok(facets.into_iter().collect())
    }

    /// Edges of the cells incident to a facet that lie inside the facet,
    /// deduplicated, ascending.
    pub fn facet_edges(&self, facet: &Facet) -> Result<Vec<Edge>, MeshTopoError> {
        let mut edges = BTreeSet::new();
        for cell in self.facet_cells(facet)? {
            for edge in self.cell_edges(cell)? {
                if facet.contains_edge(&edge) {
                    edges.insert(edge);
                }
            }
        }
        Ok(edges.into_iter().collect())
    }

    fn boundary_cache(&self) -> Result<&BoundaryCache, MeshTopoError> {
        self.boundary.get_or_try_init(|| self.compute_boundary())
    }

    /// One pass over all cells' facets: facets seen once are boundary, seen
    /// twice interior, seen three times a fatal inconsistency.
    fn compute_boundary(&self) -> Result<BoundaryCache, MeshTopoError> {
        let mut counts: HashMap<Facet, u32> = HashMap::new();
        for cell in self.cell_ids() {
            for facet in self.cell_facets(cell)? {
                *counts.entry(facet).or_insert(0) += 1;
            }
        }
        if let Some((facet, n)) = counts.iter().find(|&(_, &n)| n > 2) {
            return Err(MeshTopoError::InconsistentIncidence(format!(
                "facet {facet} touched by {n} cells"
            )));
        }
        let mut facets: Vec<Facet> = counts
            .into_iter()
            .filter_map(|(facet, n)| (n == 1).then_some(facet))
            .collect();
        facets.sort_unstable();
        let vertices: BTreeSet<VertexId> = facets
            .iter()
            .flat_map(|f| f.vertices().iter().copied())
            .collect();
        log::trace!(
            "boundary scan: {} boundary facets over {} cells",
            facets.len(),
            self.cell_count()
        );
        Ok(BoundaryCache {
            facets,
            vertices: vertices.into_iter().collect(),
        })
    }
}
