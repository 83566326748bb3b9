//! Small synthetic networks, shared by the unit tests and benchmarks.
//!
//! All fixtures use [`Projection::Identity`], so geographic and projected
//! coordinates coincide and distances read directly off the layout.

use crate::network::{EdgeSpec, MemoryNetwork, NetworkError, Projection, VehicleClass};

/// A one-way loop of four edges, each of length 10 and speed 5.
///
/// ```text
///   n4 <--- c --- n3
///   |             ^
///   d             b
///   v             |
///   n1 --- a ---> n2
/// ```
pub mod square {
    use super::*;
    use crate::network::EdgeId;

    pub const A: EdgeId = EdgeId(1);
    pub const B: EdgeId = EdgeId(2);
    pub const C: EdgeId = EdgeId(3);
    pub const D: EdgeId = EdgeId(4);

    pub fn network() -> Result<MemoryNetwork, NetworkError> {
        MemoryNetwork::builder(Projection::Identity)
            .node(1, 0.0, 0.0)
            .node(2, 10.0, 0.0)
            .node(3, 10.0, 10.0)
            .node(4, 0.0, 10.0)
            .edge(EdgeSpec::new(1, 1, 2, 5.0))
            .edge(EdgeSpec::new(2, 2, 3, 5.0))
            .edge(EdgeSpec::new(3, 3, 4, 5.0))
            .edge(EdgeSpec::new(4, 4, 1, 5.0))
            .connect_all()
            .build()
    }
}

/// A two-way main road along `y = 0` with two one-way detours.
///
/// The northern detour (`n2 -> n6 -> n7 -> n3`) is three times longer than
/// main-road edge 2 but much faster, the southern detour (`n3 -> n8 -> n9 -> n4`)
/// is both longer and slower than edge 3.
///
/// ```text
///          n6 --22--> n7
///          ^          |
///          21         23
///          |          v
///   n1 -1- n2 --2---> n3 --3---> n4 -4- n5     (reverse: 11, 12, 13, 14)
///                     |          ^
///                     31         33
///                     v          |
///                     n8 --32--> n9
/// ```
pub mod corridor {
    use super::*;
    use crate::network::EdgeId;

    pub const MAIN: [EdgeId; 4] = [EdgeId(1), EdgeId(2), EdgeId(3), EdgeId(4)];
    pub const REVERSE: [EdgeId; 4] = [EdgeId(11), EdgeId(12), EdgeId(13), EdgeId(14)];
    pub const NORTH: [EdgeId; 3] = [EdgeId(21), EdgeId(22), EdgeId(23)];
    pub const SOUTH: [EdgeId; 3] = [EdgeId(31), EdgeId(32), EdgeId(33)];

    pub fn network() -> Result<MemoryNetwork, NetworkError> {
        MemoryNetwork::builder(Projection::Identity)
            .node(1, 0.0, 0.0)
            .node(2, 100.0, 0.0)
            .node(3, 200.0, 0.0)
            .node(4, 300.0, 0.0)
            .node(5, 400.0, 0.0)
            .node(6, 100.0, 100.0)
            .node(7, 200.0, 100.0)
            .node(8, 200.0, -100.0)
            .node(9, 300.0, -100.0)
            .edge(EdgeSpec::new(1, 1, 2, 10.0))
            .edge(EdgeSpec::new(2, 2, 3, 10.0))
            .edge(EdgeSpec::new(3, 3, 4, 10.0))
            .edge(EdgeSpec::new(4, 4, 5, 10.0))
            .edge(EdgeSpec::new(11, 2, 1, 10.0))
            .edge(EdgeSpec::new(12, 3, 2, 10.0))
            .edge(EdgeSpec::new(13, 4, 3, 10.0))
            .edge(EdgeSpec::new(14, 5, 4, 10.0))
            .edge(EdgeSpec::new(21, 2, 6, 50.0))
            .edge(EdgeSpec::new(22, 6, 7, 50.0))
            .edge(EdgeSpec::new(23, 7, 3, 50.0))
            .edge(EdgeSpec::new(31, 3, 8, 5.0))
            .edge(EdgeSpec::new(32, 8, 9, 5.0))
            .edge(EdgeSpec::new(33, 9, 4, 5.0))
            .connect_all()
            .build()
    }
}

/// A single intersection whose turns are realised by internal edges.
///
/// Approach edge 1 ends at `(100, 0)`. Going straight onto edge 2 crosses
/// internal edge 101 (length 10) or, on a second lane, internal edge 104
/// (length 30). Turning left onto edge 3 crosses internal edges 102 and 103
/// (length 5 each). Edge 3 only admits buses. Every edge has speed 10.
pub mod intersection {
    use super::*;
    use crate::network::EdgeId;

    pub const APPROACH: EdgeId = EdgeId(1);
    pub const STRAIGHT: EdgeId = EdgeId(2);
    pub const LEFT: EdgeId = EdgeId(3);

    pub const THROUGH_LANE: EdgeId = EdgeId(101);
    pub const LEFT_ENTRY: EdgeId = EdgeId(102);
    pub const LEFT_EXIT: EdgeId = EdgeId(103);
    pub const THROUGH_SLOW_LANE: EdgeId = EdgeId(104);

    pub fn network() -> Result<MemoryNetwork, NetworkError> {
        MemoryNetwork::builder(Projection::Identity)
            .node(1, 0.0, 0.0)
            .node(2, 100.0, 0.0)
            .node(3, 110.0, 0.0)
            .node(4, 210.0, 0.0)
            .node(5, 105.0, 5.0)
            .node(6, 105.0, 105.0)
            .node(7, 105.0, 0.0)
            .edge(EdgeSpec::new(1, 1, 2, 10.0))
            .edge(EdgeSpec::new(2, 3, 4, 10.0))
            .edge(EdgeSpec::new(3, 5, 6, 10.0).allow([VehicleClass::Bus]))
            .edge(EdgeSpec::new(101, 2, 3, 10.0).internal())
            .edge(EdgeSpec::new(102, 2, 7, 10.0).internal())
            .edge(EdgeSpec::new(103, 7, 5, 10.0).internal())
            .edge(EdgeSpec::new(104, 2, 3, 10.0).length(30.0).internal())
            .junction(1, 2, &[101])
            .junction(1, 2, &[104])
            .junction(1, 3, &[102, 103])
            .build()
    }
}

/// A square grid of two-way streets, `size` nodes per side and `spacing`
/// units apart. Horizontal streets are twice as fast as vertical ones.
pub mod grid {
    use super::*;

    /// Node id of the grid position `(column, row)`.
    pub fn node(size: u64, column: u64, row: u64) -> u64 {
        row * size + column + 1
    }

    /// Edge id of the street from `(column, row)` heading east (`+x`).
    pub fn east(size: u64, column: u64, row: u64) -> u64 {
        node(size, column, row) * 4
    }

    /// Edge id of the street from `(column, row)` heading west (`-x`).
    pub fn west(size: u64, column: u64, row: u64) -> u64 {
        node(size, column, row) * 4 + 1
    }

    /// Edge id of the street from `(column, row)` heading north (`+y`).
    pub fn north(size: u64, column: u64, row: u64) -> u64 {
        node(size, column, row) * 4 + 2
    }

    /// Edge id of the street from `(column, row)` heading south (`-y`).
    pub fn south(size: u64, column: u64, row: u64) -> u64 {
        node(size, column, row) * 4 + 3
    }

    pub fn network(size: u64, spacing: f64) -> Result<MemoryNetwork, NetworkError> {
        let mut builder = MemoryNetwork::builder(Projection::Identity).ring_width(spacing / 10.0);

        for row in 0..size {
            for column in 0..size {
                builder = builder.node(
                    node(size, column, row),
                    column as f64 * spacing,
                    row as f64 * spacing,
                );
            }
        }

        for row in 0..size {
            for column in 0..size {
                let here = node(size, column, row);

                if column + 1 < size {
                    let right = node(size, column + 1, row);
                    builder = builder
                        .edge(EdgeSpec::new(east(size, column, row), here, right, 20.0))
                        .edge(EdgeSpec::new(west(size, column + 1, row), right, here, 20.0));
                }

                if row + 1 < size {
                    let up = node(size, column, row + 1);
                    builder = builder
                        .edge(EdgeSpec::new(north(size, column, row), here, up, 10.0))
                        .edge(EdgeSpec::new(south(size, column, row + 1), up, here, 10.0));
                }
            }
        }

        builder.connect_all().build()
    }
}
