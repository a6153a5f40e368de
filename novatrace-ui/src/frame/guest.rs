//! In-frame navigation for a microfrontend
//!
//! A microfrontend never drives the shell's router directly. Its links go
//! through [`GuestNavigator`], which posts a navigate message when embedded
//! and loads the frame URL itself when running standalone.

use leptos::*;
use novatrace::frame::{
    Emitted, Environment, Microfrontend, NavigationBridge, RouteTable, ShellManifest,
};
use std::rc::Rc;

use super::window::BrowserWindow;
use crate::settings;

/// Navigation handle for one microfrontend bundle
#[derive(Clone)]
pub struct GuestNavigator {
    table: Rc<RouteTable>,
    microfrontend: Rc<Microfrontend>,
    environment: Environment,
    window: BrowserWindow,
    bridge: Rc<NavigationBridge<BrowserWindow>>,
    current: RwSignal<String>,
}

impl GuestNavigator {
    /// Navigator for microfrontend `id` of the shell's table, or `None`
    /// outside a browser or for an unknown id
    pub fn new(id: &str, manifest: &ShellManifest) -> Option<Self> {
        let table = manifest.route_table().ok()?;
        let environment = manifest.environment;
        let window = BrowserWindow::current()?;
        let microfrontend = table.get(id)?.clone();

        let current = microfrontend
            .sub_path_for_frame(&window.pathname(), environment)
            .to_string();
        let bridge = NavigationBridge::new(window.clone()).with_target(settings::shell_target());

        Some(Self {
            microfrontend: Rc::new(microfrontend),
            table: Rc::new(table),
            environment,
            window,
            bridge: Rc::new(bridge),
            current: create_rw_signal(current),
        })
    }

    pub fn microfrontend(&self) -> &Microfrontend {
        &self.microfrontend
    }

    /// Internal route currently shown
    pub fn current(&self) -> ReadSignal<String> {
        self.current.read_only()
    }

    pub fn is_embedded(&self) -> bool {
        self.bridge.is_embedded()
    }

    /// Go to one of this microfrontend's own routes
    pub fn navigate(&self, sub_path: &str) {
        let host_path = self.microfrontend().host_path(sub_path);
        if self.go(&host_path) {
            self.current.set(sub_path.to_string());
        }
    }

    /// Go to any host route, possibly owned by another microfrontend
    pub fn navigate_host(&self, host_path: &str) {
        self.go(host_path);
    }

    /// True when the shell was asked to navigate
    fn go(&self, host_path: &str) -> bool {
        match self.bridge.emit_navigate(host_path) {
            Ok(Emitted::Posted { .. }) => true,
            Ok(Emitted::Standalone) => {
                match self.table.resolve_frame_url(host_path, self.environment) {
                    Some(url) => {
                        if let Err(e) = self.window.load(&url) {
                            web_sys::console::error_1(&format!("Navigation failed: {}", e).into());
                        }
                    }
                    None => {
                        web_sys::console::warn_1(
                            &format!("No microfrontend serves {}", host_path).into(),
                        );
                    }
                }
                false
            }
            Err(e) => {
                web_sys::console::error_1(&format!("Navigation failed: {}", e).into());
                false
            }
        }
    }
}

/// Create the navigator for bundle `id` and provide it to the component tree
pub fn provide_guest_navigator(id: &str, manifest: &ShellManifest) -> Option<GuestNavigator> {
    let navigator = GuestNavigator::new(id, manifest)?;
    provide_context(navigator.clone());
    Some(navigator)
}
