use drape::{
    Aabb, ClothError, FlatPlane, NoOpStepObserver, PinSpec, Simulation, SimulationConfig, Vec3,
};
use wasm_bindgen::prelude::*;

fn to_js(err: ClothError) -> JsValue {
    JsValue::from_str(&err.to_string())
}

// ---- Cloth Demo ----

/// Browser-side cloth driven by `requestAnimationFrame`.
///
/// The page calls `tick(performance.now())` every frame, then copies
/// `positions()` into the mesh's vertex buffer and recomputes normals.
#[wasm_bindgen]
pub struct ClothDemo {
    sim: Simulation<f32>,
    flag: bool,
}

#[wasm_bindgen]
impl ClothDemo {
    /// `preset` is `"flag"` for a wind-blown flag pinned at its pole,
    /// anything else drops a blanket onto a table.
    #[wasm_bindgen(constructor)]
    pub fn new(segments: usize, length: f32, preset: &str) -> Result<ClothDemo, JsValue> {
        let flag = preset == "flag";
        let sim: Simulation<f32> = if flag {
            Simulation::build(
                segments,
                segments,
                length,
                &FlatPlane::for_cloth(segments, segments, length),
                SimulationConfig::flag(),
            )
            .and_then(|sim| sim.with_pin(PinSpec::Column(0)))
        } else {
            Simulation::build(
                segments,
                segments,
                length,
                &FlatPlane::<f32>::blanket(),
                SimulationConfig::blanket(),
            )
            .map(|sim| sim.with_collision(Some(Aabb::table())))
        }
        .map_err(to_js)?;

        Ok(ClothDemo { sim, flag })
    }

    /// Advance one frame. Returns `false` on the very first frame.
    pub fn tick(&mut self, time: f64) -> bool {
        self.sim.tick(time, &mut NoOpStepObserver)
    }

    /// Drop the cloth again from its rest shape.
    pub fn restart(&mut self) -> Result<(), JsValue> {
        let length = self.sim.mesh().length();
        let (w, h) = (self.sim.mesh().width(), self.sim.mesh().height());
        let restarted = if self.flag {
            self.sim.restart(&FlatPlane::for_cloth(w, h, length))
        } else {
            self.sim.restart(&FlatPlane::<f32>::blanket())
        };
        restarted.map_err(to_js)
    }

    /// Place a table of the given size centred on `(x, y, z)`.
    pub fn set_table(
        &mut self,
        x: f32, y: f32, z: f32,
        width: f32, height: f32, depth: f32,
    ) -> Result<(), JsValue> {
        let table = Aabb::from_center(Vec3::new(x, y, z), Vec3::new(width, height, depth))
            .map_err(to_js)?;
        self.sim.set_collision(Some(table));
        Ok(())
    }

    pub fn clear_table(&mut self) {
        self.sim.set_collision(None);
    }

    pub fn set_wind(&mut self, enabled: bool) -> Result<(), JsValue> {
        let wind = if enabled { Some(drape::Wind::gust()) } else { None };
        let config = self.sim.config().clone().with_wind(wind);
        self.sim.set_config(config).map_err(to_js)
    }

    /// Returns flat [x0, y0, z0, x1, ...] in grid order
    pub fn positions(&self) -> Result<Vec<f32>, JsValue> {
        let mut out = vec![0.0; self.sim.mesh().particle_count() * 3];
        self.sim.write_positions(&mut out).map_err(to_js)?;
        Ok(out)
    }

    /// Returns flat [a0, b0, c0, a1, ...] triangle indices
    pub fn faces(&self) -> Vec<u32> {
        self.sim
            .mesh()
            .faces()
            .iter()
            .flat_map(|f| f.iter().map(|&i| i as u32))
            .collect()
    }

    pub fn particle_count(&self) -> usize {
        self.sim.mesh().particle_count()
    }

    pub fn segments(&self) -> usize {
        self.sim.mesh().width()
    }
}
