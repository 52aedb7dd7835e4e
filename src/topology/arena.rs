//! Handle arena and incidence index for simplicial meshes.
//!
//! [`SimplicialTopology`] is the sole owner of vertex and cell storage. A
//! vertex carries an opaque payload (typically coordinates, which this layer
//! never interprets); a cell is a `dim + 1`-tuple of vertex handles stored in
//! a flat connectivity array. The inverse incidence relation (vertex → cells
//! referencing it) is maintained atomically with cell creation and removal,
//! so the bidirectional invariant holds at every public API boundary:
//! `c` lists `v` iff `incidence(v)` lists `c`.
//!
//! Construction is additive; all derived queries (see
//! [`relations`](crate::topology::relations)) treat the topology as
//! read-only. Slots are never reused: removal bumps the slot generation so
//! stale handles fail with `InvalidVertexHandle`/`InvalidCellHandle` instead
//! of resolving to unrelated data.

use once_cell::sync::OnceCell;

use crate::mesh_error::MeshTopoError;
use crate::topology::cache::InvalidateCache;
use crate::topology::handle::{CellId, VertexId};
use crate::topology::relations::BoundaryCache;

#[derive(Clone, Debug)]
pub(crate) struct VertexSlot<V> {
    pub(crate) generation: u32,
    /// `None` once the vertex has been removed (tombstone).
    pub(crate) payload: Option<V>,
    /// Incidence index: cells referencing this vertex, in creation order.
    pub(crate) cells: Vec<CellId>,
}

#[derive(Clone, Debug)]
pub(crate) struct CellSlot {
    pub(crate) generation: u32,
    pub(crate) alive: bool,
}

/// Indexed simplicial-mesh topology: handle arena plus incidence index.
///
/// `dim` is the simplex dimension (2 for triangle meshes, 3 for tetrahedral
/// meshes); every cell is a tuple of exactly `dim + 1` distinct vertex
/// handles.
#[derive(Clone, Debug)]
pub struct SimplicialTopology<V> {
    dim: usize,
    pub(crate) vertices: Vec<VertexSlot<V>>,
    pub(crate) cells: Vec<CellSlot>,
    /// Flat connectivity, stride `dim + 1`; rows of dead cells are retained
    /// but unreachable through live handles.
    pub(crate) conn: Vec<VertexId>,
    pub(crate) boundary: OnceCell<BoundaryCache>,
    live_vertices: usize,
    live_cells: usize,
}

impl<V> SimplicialTopology<V> {
    /// Creates an empty topology for simplices of dimension `dim`.
    ///
    /// `dim` must be at least 1 and at most 255 so that local facet indices
    /// (`0..=dim`) fit the `u8` side tag used by segment classification.
    pub fn new(dim: usize) -> Result<Self, MeshTopoError> {
        if dim == 0 || dim > u8::MAX as usize {
            return Err(MeshTopoError::UnsupportedDimension(dim));
        }
        Ok(Self {
            dim,
            vertices: Vec::new(),
            cells: Vec::new(),
            conn: Vec::new(),
            boundary: OnceCell::new(),
            live_vertices: 0,
            live_cells: 0,
        })
    }

    /// Simplex dimension of this topology.
    #[inline]
    pub fn dim(&self) -> usize {
        self.dim
    }

    /// Number of vertex handles per cell (`dim + 1`).
    #[inline]
    pub fn cell_arity(&self) -> usize {
        self.dim + 1
    }

    /// Number of live vertices.
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.live_vertices
    }

    /// Number of live cells.
    #[inline]
    pub fn cell_count(&self) -> usize {
        self.live_cells
    }

    /// Adds a vertex with an opaque payload and returns its handle.
    pub fn add_vertex(&mut self, payload: V) -> VertexId {
        let id = VertexId::new(self.vertices.len() as u32, 0);
        self.vertices.push(VertexSlot {
            generation: 0,
            payload: Some(payload),
            cells: Vec::new(),
        });
        self.live_vertices += 1;
        self.invalidate_cache();
        id
    }

    /// Adds a cell over `dim + 1` distinct live vertex handles.
    ///
    /// Registers the cell in the incidence index of each vertex. On error the
    /// arena is left unchanged: all handles are checked before any mutation.
    pub fn add_cell(&mut self, vertices: &[VertexId]) -> Result<CellId, MeshTopoError> {
        let arity = self.cell_arity();
        if vertices.len() != arity {
            return Err(MeshTopoError::DimensionMismatch {
                expected: arity,
                found: vertices.len(),
            });
        }
        for (i, &v) in vertices.iter().enumerate() {
            if vertices[..i].contains(&v) {
                return Err(MeshTopoError::DegenerateCell(v));
            }
            self.vertex_slot(v)?;
        }

        let id = CellId::new(self.cells.len() as u32, 0);
        self.cells.push(CellSlot {
            generation: 0,
            alive: true,
        });
        self.conn.extend_from_slice(vertices);
        for &v in vertices {
            self.vertices[v.index()].cells.push(id);
        }
        self.live_cells += 1;
        self.invalidate_cache();
        Ok(id)
    }

    /// Removes a cell, unregistering it from the incidence index.
    ///
    /// The slot generation is bumped so the old handle becomes stale.
    pub fn remove_cell(&mut self, cell: CellId) -> Result<(), MeshTopoError> {
        self.cell_slot(cell)?;
        let arity = self.cell_arity();
        let row = cell.index() * arity..(cell.index() + 1) * arity;
        for i in row {
            let v = self.conn[i];
            self.vertices[v.index()].cells.retain(|&c| c != cell);
        }
        let slot = &mut self.cells[cell.index()];
        slot.alive = false;
        slot.generation += 1;
        self.live_cells -= 1;
        self.invalidate_cache();
        Ok(())
    }

    /// Removes a vertex with no remaining incident cells and returns its
    /// payload. Fails with `VertexInUse` otherwise.
    pub fn remove_vertex(&mut self, vertex: VertexId) -> Result<V, MeshTopoError> {
        let incident = self.vertex_slot(vertex)?.cells.len();
        if incident > 0 {
            return Err(MeshTopoError::VertexInUse {
                vertex,
                cells: incident,
            });
        }
        let slot = &mut self.vertices[vertex.index()];
        let payload = slot
            .payload
            .take()
            .ok_or(MeshTopoError::InvalidVertexHandle(vertex))?;
        slot.generation += 1;
        self.live_vertices -= 1;
        self.invalidate_cache();
        Ok(payload)
    }

    /// The cell's vertex tuple in stored (creation) order.
    pub fn cell_vertices(&self, cell: CellId) -> Result<&[VertexId], MeshTopoError> {
        self.cell_slot(cell)?;
        let arity = self.cell_arity();
        Ok(&self.conn[cell.index() * arity..(cell.index() + 1) * arity])
    }

    /// The vertex payload.
    pub fn vertex_payload(&self, vertex: VertexId) -> Result<&V, MeshTopoError> {
        let slot = self.vertex_slot(vertex)?;
        slot.payload
            .as_ref()
            .ok_or(MeshTopoError::InvalidVertexHandle(vertex))
    }

    /// Incidence index: cells referencing `vertex`, in creation order.
    pub fn cells_of_vertex(&self, vertex: VertexId) -> Result<&[CellId], MeshTopoError> {
        Ok(&self.vertex_slot(vertex)?.cells)
    }

    /// Live vertices with payloads, in ascending slot order.
    pub fn vertices(&self) -> impl Iterator<Item = (VertexId, &V)> + '_ {
        self.vertices.iter().enumerate().filter_map(|(i, slot)| {
            slot.payload
                .as_ref()
                .map(|payload| (VertexId::new(i as u32, slot.generation), payload))
        })
    }

    /// Live vertex handles, in ascending slot order.
    pub fn vertex_ids(&self) -> impl Iterator<Item = VertexId> + '_ {
        self.vertices().map(|(id, _)| id)
    }

    /// Live cell handles, in ascending slot order.
    pub fn cell_ids(&self) -> impl Iterator<Item = CellId> + '_ {
        self.cells.iter().enumerate().filter_map(|(i, slot)| {
            slot.alive
                .then(|| CellId::new(i as u32, slot.generation))
        })
    }

    /// Checks the bidirectional incidence invariant and the facet incidence
    /// bound (every facet touched by at most two cells).
    ///
    /// A failure here means a construction-phase collaborator corrupted the
    /// topology; per the error contract this is not recoverable.
    pub fn validate(&self) -> Result<(), MeshTopoError> {
        for cell in self.cell_ids() {
            for &v in self.cell_vertices(cell)? {
                let slot = self.vertex_slot(v).map_err(|_| {
                    MeshTopoError::InconsistentIncidence(format!(
                        "cell {cell} references dead vertex {v}"
                    ))
                })?;
                if !slot.cells.contains(&cell) {
                    return Err(MeshTopoError::InconsistentIncidence(format!(
                        "cell {cell} references {v} but incidence({v}) misses it"
                    )));
                }
            }
        }
        for (v, _) in self.vertices() {
            for &cell in self.cells_of_vertex(v)? {
                let verts = self.cell_vertices(cell).map_err(|_| {
                    MeshTopoError::InconsistentIncidence(format!(
                        "incidence({v}) lists dead cell {cell}"
                    ))
                })?;
                if !verts.contains(&v) {
                    return Err(MeshTopoError::InconsistentIncidence(format!(
                        "incidence({v}) lists {cell} which does not contain {v}"
                    )));
                }
            }
        }
        // The boundary scan enforces the <= 2 cells-per-facet rule.
        self.boundary_facets()?;
        Ok(())
    }

    pub(crate) fn vertex_slot(&self, v: VertexId) -> Result<&VertexSlot<V>, MeshTopoError> {
        match self.vertices.get(v.index()) {
            Some(slot) if slot.generation == v.generation() && slot.payload.is_some() => Ok(slot),
            _ => Err(MeshTopoError::InvalidVertexHandle(v)),
        }
    }

    pub(crate) fn cell_slot(&self, c: CellId) -> Result<&CellSlot, MeshTopoError> {
        match self.cells.get(c.index()) {
            Some(slot) if slot.generation == c.generation() && slot.alive => Ok(slot),
            _ => Err(MeshTopoError::InvalidCellHandle(c)),
        }
    }
}

impl<V> InvalidateCache for SimplicialTopology<V> {
    #[inline]
    fn invalidate_cache(&mut self) {
        self.boundary.take();
    }
}
