//! Kinetic Balls entry point
//!
//! On the web this mounts the scene into `#kinetic-balls`. Natively it runs a
//! seeded headless simulation and logs what happened.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_scene {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;

    use kinetic_balls::SceneConfig;
    use kinetic_balls::platform::web::{WebHost, mount_scene};

    /// Element id the page provides for the animation
    pub const CONTAINER_ID: &str = "kinetic-balls";

    thread_local! {
        static SCENE: RefCell<Option<Rc<RefCell<WebHost>>>> = const { RefCell::new(None) };
    }

    /// Mount (or re-mount) the scene into the given element
    pub fn mount(container_id: &str) {
        unmount();
        let scene = mount_scene(container_id, SceneConfig::load());
        SCENE.with(|slot| *slot.borrow_mut() = scene);
    }

    /// Tear the scene down; safe to call any number of times
    pub fn unmount() {
        let scene = SCENE.with(|slot| slot.borrow_mut().take());
        if let Some(scene) = scene {
            if let Ok(mut host) = scene.try_borrow_mut() {
                host.unmount();
            }
        }
    }

    /// Unmount when the page goes away
    pub fn setup_pagehide() {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            unmount();
        });
        if let Err(e) =
            window.add_event_listener_with_callback("pagehide", closure.as_ref().unchecked_ref())
        {
            log::debug!("Failed to listen for pagehide: {:?}", e);
        }
        // Lives as long as the page
        closure.forget();
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Kinetic balls starting...");
        mount(CONTAINER_ID);
        setup_pagehide();
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_scene::run();
}

/// Mount into another element, e.g. after a client-side route change
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen]
pub fn mount_kinetic_balls(container_id: &str) {
    wasm_scene::mount(container_id);
}

/// Stop the animation and remove its listeners
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen]
pub fn unmount_kinetic_balls() {
    wasm_scene::unmount();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Kinetic balls (native) starting...");
    log::info!("Native mode is headless - run with `trunk serve` for the web version");

    let seed = std::env::args()
        .nth(1)
        .and_then(|arg| arg.parse().ok())
        .unwrap_or(42);
    headless_run(seed, 1000);
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Drive a 400x400 scene through a scripted session
#[cfg(not(target_arch = "wasm32"))]
fn headless_run(seed: u64, frames: usize) {
    use kinetic_balls::host::BoundingBox;
    use kinetic_balls::renderer::RecordingSurface;
    use kinetic_balls::{ManualScheduler, SceneConfig, SceneHost, Theme, ThemeCell, ThemeSource};

    let theme = ThemeCell::new(Theme::Dark);
    let config = SceneConfig::load().with_seed(seed);
    let mut host: SceneHost<ManualScheduler, RecordingSurface> =
        SceneHost::new(config, seed, ManualScheduler::new(), theme.clone());

    let container = BoundingBox::new(0.0, 0.0, 400.0, 400.0);
    if !host.mount(Some(container), Some(RecordingSurface::new())) {
        log::error!("Headless scene failed to mount");
        return;
    }

    let mut escaped = 0;
    for frame in 1..=frames {
        match frame {
            250 => host.on_click(),
            400 => host.on_pointer_move(200.0, 200.0),
            600 => host.on_pointer_leave(),
            750 => {
                theme.toggle();
            }
            _ => {}
        }
        host.advance(1);

        let system = host.system();
        escaped += system
            .bodies
            .iter()
            .filter(|b| !b.is_inside(system.bounds, 1e-3))
            .count();
        if frame % 100 == 0 {
            log::info!(
                "frame {:4}: energy {:8.2}, theme {}",
                frame,
                system.kinetic_energy(),
                theme.theme().as_str()
            );
        }
    }

    host.unmount();
    println!(
        "Ran {} frames with {} bodies (seed {}): {} out-of-bounds samples",
        frames,
        host.system().len(),
        seed,
        escaped
    );
}
