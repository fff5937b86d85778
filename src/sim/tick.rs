/// Maximum frame time to prevent spiral of death.
/// If a frame takes longer than this, we cap the accumulated time.
const MAX_FRAME_TIME: f64 = 0.25;

/// Fixed-timestep accumulator: turns variable frame times into a whole
/// number of simulation ticks at `tick_rate` per second.
pub struct GameLoop {
    pub sim_dt: f64,
    pub accumulator: f64,
    pub sim_tick: u64,
    pub last_frame: Option<std::time::Instant>,
    // FPS/UPS tracking
    last_present: Option<std::time::Instant>,
    fps_samples: Vec<f64>,
    ups_ticks: u32,
    ups_timer: f64,
    pub fps: f64,
    pub ups: f64,
}

impl GameLoop {
    pub fn new(tick_rate: u32) -> Self {
        Self {
            sim_dt: 1.0 / tick_rate.max(1) as f64,
            accumulator: 0.0,
            sim_tick: 0,
            last_frame: None,
            last_present: None,
            fps_samples: Vec::with_capacity(60),
            ups_ticks: 0,
            ups_timer: 0.0,
            fps: 0.0,
            ups: 0.0,
        }
    }

    /// Call whenever the event loop is about to wait. Returns the elapsed
    /// time (capped) since the previous call, or None on the very first call.
    pub fn begin_frame(&mut self) -> Option<f64> {
        let now = std::time::Instant::now();
        let dt = self
            .last_frame
            .map(|last| now.duration_since(last).as_secs_f64().min(MAX_FRAME_TIME));
        self.last_frame = Some(now);
        dt
    }

    /// Call once per presented frame; feeds the FPS average.
    pub fn frame_presented(&mut self) {
        let now = std::time::Instant::now();
        if let Some(last) = self.last_present {
            self.record_frame_time(now.duration_since(last).as_secs_f64());
        }
        self.last_present = Some(now);
    }

    fn record_frame_time(&mut self, raw_dt: f64) {
        if raw_dt <= 0.0 {
            return;
        }
        self.fps_samples.push(raw_dt);
        if self.fps_samples.len() > 60 {
            self.fps_samples.remove(0);
        }
        let avg: f64 = self.fps_samples.iter().sum::<f64>() / self.fps_samples.len() as f64;
        self.fps = 1.0 / avg;
    }

    /// Accumulate frame time and return how many sim ticks should run.
    pub fn accumulate(&mut self, frame_dt: f64) -> u32 {
        self.accumulator += frame_dt;
        self.ups_timer += frame_dt;

        let mut ticks = 0u32;
        while self.accumulator >= self.sim_dt {
            self.accumulator -= self.sim_dt;
            self.sim_tick += 1;
            ticks += 1;
            self.ups_ticks += 1;
        }

        if self.ups_timer >= 1.0 {
            self.ups = self.ups_ticks as f64 / self.ups_timer;
            self.ups_ticks = 0;
            self.ups_timer = 0.0;
        }

        ticks
    }
}
