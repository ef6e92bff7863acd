//! In-memory cell library loadable from JSON
//!
//! ```json
//! { "top": "TOP",
//!   "cells": [
//!     { "name": "LEAF", "rects": [[0, 0, 10, 2]] },
//!     { "name": "TOP", "instances": [{ "cell": "LEAF", "x": 100, "y": 0, "orient": "R90" }] } ] }
//! ```

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::path::Path;

use super::cell::LayoutCell;
use crate::error::{invalid, DrcError, Result};
use crate::geometry::{Orientation, Point, Rectangle};

/// Placement of another cell inside a cell
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InstanceDef {
    pub cell: String,
    pub x: i32,
    pub y: i32,
    #[serde(default)]
    pub orient: Orientation,
}

/// A cell definition: own rectangles plus placed sub-cells
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CellDef {
    pub name: String,
    /// `[min_x, min_y, max_x, max_y]` in local coordinates
    #[serde(default)]
    pub rects: Vec<[i32; 4]>,
    #[serde(default)]
    pub instances: Vec<InstanceDef>,
}

impl CellDef {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_rect(mut self, min_x: i32, min_y: i32, max_x: i32, max_y: i32) -> Self {
        self.rects.push([min_x, min_y, max_x, max_y]);
        self
    }

    pub fn with_instance(mut self, cell: impl Into<String>, x: i32, y: i32, orient: Orientation) -> Self {
        self.instances.push(InstanceDef {
            cell: cell.into(),
            x,
            y,
            orient,
        });
        self
    }

    /// Check rectangle and anchor invariants local to this cell
    fn validate(&self) -> Result<()> {
        for &[min_x, min_y, max_x, max_y] in &self.rects {
            Rectangle::from_coords(min_x, min_y, max_x, max_y)
                .map_err(|e| invalid(format!("cell '{}': {}", self.name, e)))?;
        }
        for inst in &self.instances {
            Point::new(inst.x, inst.y)
                .map_err(|e| invalid(format!("cell '{}' instance of '{}': {}", self.name, inst.cell, e)))?;
        }
        Ok(())
    }
}

#[derive(Deserialize)]
struct LibraryFile {
    #[serde(default)]
    top: Option<String>,
    cells: Vec<CellDef>,
}

/// Named cells with an optional designated top cell
#[derive(Debug, Clone, Default)]
pub struct LayoutLibrary {
    cells: IndexMap<String, CellDef>,
    top: Option<String>,
}

impl LayoutLibrary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a cell, rejecting duplicate names and invalid geometry
    ///
    /// Instances may only refer to cells already in the library, so a
    /// library built this way is acyclic.
    pub fn add_cell(&mut self, def: CellDef) -> Result<()> {
        for inst in &def.instances {
            if !self.cells.contains_key(&inst.cell) {
                return Err(DrcError::UnknownCell(format!(
                    "'{}' (instantiated in '{}' before being defined)",
                    inst.cell, def.name
                )));
            }
        }
        self.insert_cell(def)
    }

    fn insert_cell(&mut self, def: CellDef) -> Result<()> {
        def.validate()?;
        if self.cells.contains_key(&def.name) {
            return Err(invalid(format!("duplicate cell name '{}'", def.name)));
        }
        self.cells.insert(def.name.clone(), def);
        Ok(())
    }

    pub fn set_top(&mut self, name: impl Into<String>) {
        self.top = Some(name.into());
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn cell_names(&self) -> impl Iterator<Item = &str> {
        self.cells.keys().map(String::as_str)
    }

    /// Parse a library; cells may appear in any order, references and
    /// acyclicity are checked once all are read
    pub fn from_json_str(json: &str) -> Result<Self> {
        let file: LibraryFile = serde_json::from_str(json)?;
        let mut library = LayoutLibrary::new();
        for def in file.cells {
            library.insert_cell(def)?;
        }
        library.top = file.top;
        library.validate()?;
        Ok(library)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// Check that every instance refers to a known cell and that the
    /// hierarchy is acyclic
    pub fn validate(&self) -> Result<()> {
        for def in self.cells.values() {
            for inst in &def.instances {
                if !self.cells.contains_key(&inst.cell) {
                    return Err(DrcError::UnknownCell(format!(
                        "'{}' (instantiated in '{}')",
                        inst.cell, def.name
                    )));
                }
            }
        }
        if let Some(top) = &self.top {
            if !self.cells.contains_key(top) {
                return Err(DrcError::UnknownCell(top.clone()));
            }
        }

        // 0 = unvisited, 1 = on the current path, 2 = done
        let mut state = vec![0u8; self.cells.len()];
        for index in 0..self.cells.len() {
            self.visit_for_cycles(index, &mut state)?;
        }
        Ok(())
    }

    fn visit_for_cycles(&self, index: usize, state: &mut [u8]) -> Result<()> {
        match state[index] {
            2 => return Ok(()),
            1 => {
                let name = self.cells.get_index(index).map(|(k, _)| k.clone()).unwrap_or_default();
                return Err(DrcError::CyclicHierarchy(name));
            }
            _ => {}
        }
        state[index] = 1;
        if let Some((_, def)) = self.cells.get_index(index) {
            for inst in &def.instances {
                if let Some(child) = self.cells.get_index_of(&inst.cell) {
                    self.visit_for_cycles(child, state)?;
                }
            }
        }
        state[index] = 2;
        Ok(())
    }

    pub fn cell(&self, name: &str) -> Result<CellRef<'_>> {
        self.cells
            .get(name)
            .map(|def| CellRef { library: self, def })
            .ok_or_else(|| DrcError::UnknownCell(name.to_string()))
    }

    /// The designated top cell, or the last cell added when none was named
    pub fn top_cell(&self) -> Result<CellRef<'_>> {
        match &self.top {
            Some(name) => self.cell(name),
            None => self
                .cells
                .last()
                .map(|(_, def)| CellRef { library: self, def })
                .ok_or_else(|| invalid("library has no cells")),
        }
    }
}

/// A cell bound to the library that resolves its instances
#[derive(Debug, Clone, Copy)]
pub struct CellRef<'a> {
    library: &'a LayoutLibrary,
    def: &'a CellDef,
}

impl<'a> CellRef<'a> {
    pub fn def(&self) -> &'a CellDef {
        self.def
    }
}

impl LayoutCell for CellRef<'_> {
    fn name(&self) -> &str {
        &self.def.name
    }

    fn traverse_rectangles(
        &self,
        f: &mut dyn FnMut(i32, i32, i32, i32) -> Result<()>,
    ) -> Result<()> {
        for &[min_x, min_y, max_x, max_y] in &self.def.rects {
            f(min_x, min_y, max_x, max_y)?;
        }
        Ok(())
    }

    fn traverse_subcell_instances(
        &self,
        f: &mut dyn FnMut(&dyn LayoutCell, i32, i32, Orientation) -> Result<()>,
    ) -> Result<()> {
        for inst in &self.def.instances {
            let child = self.library.cell(&inst.cell)?;
            f(&child, inst.x, inst.y, inst.orient)?;
        }
        Ok(())
    }
}
