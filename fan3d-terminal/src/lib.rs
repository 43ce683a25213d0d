/// Terminal frame driver for the fan simulator
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent},
    execute, queue,
    style::{Color, Print, ResetColor, SetForegroundColor},
    terminal::{self},
};
use fan3d_core::{FanModel, FanType, InputEvent};
use nalgebra::Matrix4;
use std::io::{self, stdout, Write};
use std::time::{Duration, Instant};

pub mod camera;
pub mod renderer;

pub use camera::{Camera, ProjectionMode};
pub use renderer::AsciiRenderer;

/// Camera orbit azimuth at startup, radians
const VIEW_AZIMUTH: f32 = std::f32::consts::FRAC_PI_4;
/// Camera orbit elevation at startup, radians
const VIEW_ELEVATION: f32 = 0.35;
/// Camera distance as a multiple of the assembly's bounding radius
const VIEW_DISTANCE_FACTOR: f32 = 2.5;

/// Main application: owns the event loop, forwards key presses to the fan
/// model as input events and hands each frame to the rasterizer.
pub struct TerminalApp {
    model: FanModel,
    camera: Camera,
    renderer: AsciiRenderer,
    azimuth: f32,
    elevation: f32,
    running: bool,
    last_tick: Instant,
    last_frame: Instant,
    frame_count: u32,
    fps: f32,
}

impl TerminalApp {
    pub fn new(model: FanModel) -> io::Result<Self> {
        let (width, height) = terminal::size()?;

        Ok(Self {
            model,
            camera: Camera::new(width as u32, height as u32),
            renderer: AsciiRenderer::new(width as usize, height as usize),
            azimuth: VIEW_AZIMUTH,
            elevation: VIEW_ELEVATION,
            running: true,
            last_tick: Instant::now(),
            last_frame: Instant::now(),
            frame_count: 0,
            fps: 0.0,
        })
    }

    pub fn set_projection(&mut self, mode: ProjectionMode) {
        self.camera.mode = mode;
    }

    pub fn run(&mut self) -> io::Result<()> {
        terminal::enable_raw_mode()?;
        execute!(stdout(), terminal::EnterAlternateScreen, cursor::Hide)?;

        let result = self.main_loop();

        // Cleanup
        terminal::disable_raw_mode()?;
        execute!(stdout(), terminal::LeaveAlternateScreen, cursor::Show)?;

        result
    }

    fn main_loop(&mut self) -> io::Result<()> {
        let target_frame_time = Duration::from_millis(1000 / 60); // 60 FPS target
        self.last_tick = Instant::now();

        while self.running {
            let frame_start = Instant::now();

            // Handle input
            if event::poll(Duration::from_millis(0))? {
                self.handle_input()?;
            }

            // Measured dt keeps the physics honest when a frame runs long;
            // capped so a stall never teleports the rotor.
            let dt = self.last_tick.elapsed().as_secs_f32().min(0.1);
            self.last_tick = Instant::now();
            self.render(dt)?;

            // Frame timing
            self.frame_count += 1;
            let elapsed = frame_start.elapsed();
            if elapsed < target_frame_time {
                std::thread::sleep(target_frame_time - elapsed);
            }

            // Update FPS counter
            let now = Instant::now();
            if (now - self.last_frame).as_secs() >= 1 {
                self.fps = self.frame_count as f32 / (now - self.last_frame).as_secs_f32();
                self.frame_count = 0;
                self.last_frame = now;
            }
        }

        Ok(())
    }

    fn handle_input(&mut self) -> io::Result<()> {
        if let Event::Key(KeyEvent { code, .. }) = event::read()? {
            let input = match code {
                KeyCode::Char('q') | KeyCode::Esc => {
                    self.running = false;
                    None
                }
                KeyCode::Up => Some(InputEvent::SpeedUp),
                KeyCode::Down => Some(InputEvent::SpeedDown),
                KeyCode::Char(' ') => Some(InputEvent::ToggleOscillation),
                KeyCode::Char('o') => Some(InputEvent::TogglePower),
                KeyCode::Char('l') => Some(InputEvent::CycleLighting),
                KeyCode::Char(c @ '1'..='5') => FanType::from_index(c as usize - '0' as usize)
                    .map(InputEvent::SelectFanType),
                // View orbit
                KeyCode::Char('a') | KeyCode::Left => {
                    self.azimuth -= 0.1;
                    None
                }
                KeyCode::Char('d') | KeyCode::Right => {
                    self.azimuth += 0.1;
                    None
                }
                KeyCode::Char('w') => {
                    self.elevation = (self.elevation + 0.1).min(1.4);
                    None
                }
                KeyCode::Char('s') => {
                    self.elevation = (self.elevation - 0.1).max(-1.4);
                    None
                }
                _ => None,
            };

            if let Some(input) = input {
                if let Err(err) = self.model.handle_input(input) {
                    log::warn!("input rejected: {err}");
                }
            }
        }
        Ok(())
    }

    fn render(&mut self, dt: f32) -> io::Result<()> {
        let frame = self.model.advance_frame(dt);

        let distance = (frame.bounding_radius() * VIEW_DISTANCE_FACTOR).max(2.0);
        self.camera.orbit(self.azimuth, self.elevation, distance);
        let model_matrix = Matrix4::identity();

        // Clear renderer
        self.renderer.clear();
        self.renderer.render_frame(&frame, &model_matrix, &self.camera);

        // Output to terminal
        let mut stdout = stdout();
        queue!(stdout, cursor::MoveTo(0, 0))?;

        self.renderer.draw(&mut stdout)?;

        // Draw HUD overlay
        queue!(
            stdout,
            cursor::MoveTo(0, 0),
            SetForegroundColor(Color::Yellow),
            Print(format!(
                "{} Fan | {:.1}/{:.1} RPM | Power: {} | Oscillate: {} | Lighting: {} | FPS: {:.1}",
                self.model.fan_type(),
                self.model.current_speed_rpm(),
                self.model.target_speed_rpm(),
                if self.model.is_powered() { "on" } else { "off" },
                if self.model.is_oscillating() { "on" } else { "off" },
                self.model.lighting_mode(),
                self.fps,
            )),
            cursor::MoveTo(0, 1),
            SetForegroundColor(Color::DarkGrey),
            Print("Up/Down=Speed Space=Oscillate O=Power L=Lighting 1-5=Fan Type WASD=View Q=Quit"),
            ResetColor
        )?;

        stdout.flush()?;
        Ok(())
    }
}
