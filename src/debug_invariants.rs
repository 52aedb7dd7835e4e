use crate::mesh_error::MeshTopoError;
use crate::topology::arena::SimplicialTopology;

/// Trait for validating data structure invariants.
pub trait DebugInvariants {
    /// Assert invariants in debug builds or when invariant checking is enabled.
    fn debug_assert_invariants(&self);
    /// Validate invariants and return the first error encountered.
    fn validate_invariants(&self) -> Result<(), MeshTopoError>;
}

/// Helper macro to run a fallible check and panic on error when invariant
/// checking is enabled.
#[macro_export]
macro_rules! debug_invariants {
    ($expr:expr, $($ctx:tt)*) => {
        #[cfg(any(debug_assertions, feature = "strict-invariants", feature = "check-invariants"))]
        if let Err(e) = $expr {
            panic!(concat!("[invariants] ", $($ctx)*, ": {}"), e);
        }
    };
}

impl<V> DebugInvariants for SimplicialTopology<V> {
    fn debug_assert_invariants(&self) {
        debug_invariants!(self.validate(), "simplicial topology");
    }

    fn validate_invariants(&self) -> Result<(), MeshTopoError> {
        self.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_topology_passes() {
        let mut topo = SimplicialTopology::new(2).unwrap();
        let a = topo.add_vertex(0);
        let b = topo.add_vertex(1);
        let c = topo.add_vertex(2);
        topo.add_cell(&[a, b, c]).unwrap();
        topo.validate_invariants().unwrap();
        topo.debug_assert_invariants();
    }
}
