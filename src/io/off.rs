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

/// Write a mesh as OFF, lifting nodes to z = 0.
/// Format:
///   OFF
///   <numVertices> <numFaces> 0
///   x y 0
///   ...
///   3 i j k   (zero-based indices)
pub fn write_off<W: Write>(mesh: &Mesh, mut out: W) -> io::Result<()> {
    writeln!(out, "OFF")?;
    writeln!(out, "{} {} {}", mesh.node_count(), mesh.element_count(), 0)?;

    for p in mesh.nodes() {
        writeln!(out, "{:?} {:?} {:?}", p.x, p.y, 0.0)?;
    }
    for [a, b, c] in mesh.elements() {
        writeln!(out, "3 {} {} {}", a, b, c)?;
    }
    out.flush()
}

pub fn save_off<P: AsRef<Path>>(mesh: &Mesh, path: P) -> Result<()> {
    let file = File::create(path)?;
    write_off(mesh, BufWriter::new(file))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::tests::unit_square;

    #[test]
    fn off_text() {
        let mut buf = Vec::new();
        write_off(&unit_square(), &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert_eq!(
            text,
            "OFF\n4 2 0\n0.0 1.0 0.0\n1.0 1.0 0.0\n1.0 0.0 0.0\n0.0 0.0 0.0\n3 1 0 2\n3 2 0 3\n"
        );
    }
}
