// SPDX-License-Identifier: MIT
//
// Copyright (c) 2025 Alexandre Severino
//
// Permission is hereby granted, free of charge, to any person obtaining a copy
// of this software and associated documentation files (the "Software"), to deal
// in the Software without restriction, including without limitation the rights
// to use, copy, modify, merge, publish, distribute, sublicense, and/or sell
// copies of the Software, and to permit persons to whom the Software is
// furnished to do so, subject to the following conditions:
//
// The above copyright notice and this permission notice shall be included in
// all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
// IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
// FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
// AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
// LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
// OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE
// SOFTWARE.

use std::{
    fs::File,
    io::{self, BufWriter, Write},
    path::Path,
};

use crate::{error::Result, mesh::Mesh};

/// Writes one `name = { ... }` block, one entry per line, comma-separated.
fn write_block<W, I>(out: &mut W, name: &str, rows: I) -> io::Result<()>
where
    W: Write,
    I: IntoIterator<Item = String>,
{
    writeln!(out, "{name} =")?;
    writeln!(out, "{{")?;
    let mut rows = rows.into_iter().peekable();
    while let Some(row) = rows.next() {
        let sep = if rows.peek().is_some() { "," } else { "" };
        writeln!(out, "  {{ {row} }}{sep}")?;
    }
    writeln!(out, "}}")
}

/// Write a mesh in the hermes2d mesh file format.
///
/// Elements carry material marker 0; boundary entries are
/// `{ a, b, marker }` with the loop markers of the mesh.
pub fn write_hermes2d<W: Write>(mesh: &Mesh, mut out: W) -> io::Result<()> {
    write_block(
        &mut out,
        "vertices",
        mesh.nodes().iter().map(|p| format!("{:?}, {:?}", p.x, p.y)),
    )?;
    writeln!(out)?;
    write_block(
        &mut out,
        "elements",
        mesh.elements()
            .iter()
            .map(|[a, b, c]| format!("{a}, {b}, {c}, 0")),
    )?;
    writeln!(out)?;
    write_block(
        &mut out,
        "boundaries",
        mesh.boundaries()
            .iter()
            .map(|e| format!("{}, {}, {}", e.a, e.b, e.marker)),
    )?;
    out.flush()
}

pub fn save_hermes2d<P: AsRef<Path>>(mesh: &Mesh, path: P) -> Result<()> {
    let file = File::create(path)?;
    write_hermes2d(mesh, BufWriter::new(file))?;
    Ok(())
}
