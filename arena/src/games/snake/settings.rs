use std::time::Duration;

/// Grid geometry follows the rendering surface: a square canvas of
/// canvas_size pixels divided into cell_size cells.
#[derive(Clone, Debug)]
pub struct EngineSettings {
    pub canvas_size: u32,
    pub cell_size: u32,
    pub tick_interval: Duration,
}

pub const MIN_TILE_COUNT: u32 = 5;

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            canvas_size: 400,
            cell_size: 20,
            tick_interval: Duration::from_millis(150),
        }
    }
}

impl EngineSettings {
    pub fn tile_count(&self) -> i32 {
        (self.canvas_size / self.cell_size) as i32
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.cell_size == 0 || self.canvas_size == 0 {
            return Err("Canvas and cell size must be positive".to_string());
        }
        if self.canvas_size % self.cell_size != 0 {
            return Err("Cell size must divide canvas size exactly".to_string());
        }
        if self.canvas_size / self.cell_size < MIN_TILE_COUNT {
            return Err(format!(
                "Grid must be at least {}x{} tiles",
                MIN_TILE_COUNT, MIN_TILE_COUNT
            ));
        }
        let tick_ms = self.tick_interval.as_millis();
        if !(50..=5000).contains(&tick_ms) {
            return Err("Tick interval must be between 50ms and 5000ms".to_string());
        }
        Ok(())
    }
}
