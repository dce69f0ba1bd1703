//! Delimited text export of a trajectory
//!
//! One header row `t,x,y,z,vx,vy,vz,ax,ay,az` followed by one row per sample,
//! all values in SI units with full `f64` precision.

use std::io::{self, Write};

use crate::simulation::trajectory::Trajectory;

pub const CSV_HEADER: &str = "t,x,y,z,vx,vy,vz,ax,ay,az";

pub fn write_csv<W: Write>(trajectory: &Trajectory, mut out: W) -> io::Result<()> {
    writeln!(out, "{}", CSV_HEADER)?;
    for s in trajectory {
        let (r, v, a) = (s.position, s.velocity, s.acceleration);
        writeln!(
            out,
            "{:e},{:e},{:e},{:e},{:e},{:e},{:e},{:e},{:e},{:e}",
            s.t, r.x, r.y, r.z, v.x, v.y, v.z, a.x, a.y, a.z
        )?;
    }
    out.flush()
}
