//! open-ds-hub GUI: iced-based desktop application for DualSense lightbar control.

use iced::widget::{button, column, container, row, slider, text, text_input};
use iced::{Element, Length, Subscription, Task as IcedTask, Theme};
use std::time::{Duration, Instant};

use open_ds_hub_core::device::{Color, ConnectionMode};
use open_ds_hub_core::transport::HidTransport;

/// Device polling interval.
const POLL_INTERVAL: Duration = Duration::from_secs(2);
const READ_TIMEOUT_MS: i32 = 1000;

fn main() -> iced::Result {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    iced::application("Open DS Hub", App::update, App::view)
        .theme(|_| Theme::Dark)
        .subscription(App::subscription)
        .run_with(|| (App::new(), IcedTask::none()))
}

struct GuiHidTransport {
    device: hidapi::HidDevice,
    mode: ConnectionMode,
}

impl GuiHidTransport {
    fn open_first_supported() -> Result<Self, String> {
        let devices = open_ds_hub_core::device::discover_devices().map_err(|e| e.to_string())?;
        let first = devices
            .first()
            .ok_or_else(|| "No supported DualSense controller found".to_string())?;

        let api = hidapi::HidApi::new().map_err(|e| format!("hidapi init: {e}"))?;
        let device = api.open(first.vid, first.pid).map_err(|e| {
            format!(
                "open HID device (VID=0x{:04X} PID=0x{:04X}): {e}",
                first.vid, first.pid
            )
        })?;

        Ok(Self {
            device,
            mode: first.mode,
        })
    }
}

impl HidTransport for GuiHidTransport {
    fn write_report(&self, data: &[u8]) -> open_ds_hub_core::error::Result<usize> {
        self.device
            .write(data)
            .map_err(|e| open_ds_hub_core::error::Error::Hid(format!("write: {e}")))
    }

    fn read_input_report(
        &self,
        buf: &mut [u8],
        timeout_ms: i32,
    ) -> open_ds_hub_core::error::Result<usize> {
        let n = self
            .device
            .read_timeout(buf, timeout_ms)
            .map_err(|e| open_ds_hub_core::error::Error::Hid(format!("read_timeout: {e}")))?;

        if n == 0 {
            return Err(open_ds_hub_core::error::Error::Timeout(format!(
                "hid_read timed out after {timeout_ms}ms"
            )));
        }

        Ok(n)
    }
}

/// Application state.
struct App {
    red: u8,
    green: u8,
    blue: u8,
    hex_input: String,
    connected: bool,
    mode_label: String,
    battery: Option<(u8, Option<bool>)>,
    status: String,
    last_poll: Instant,
    auto_poll: bool,
}

#[derive(Debug, Clone)]
enum Message {
    RedChanged(u8),
    GreenChanged(u8),
    BlueChanged(u8),
    HexChanged(String),
    ApplyHex,
    ApplyColor,
    ReadStatus,
    RefreshDevice,
    PollTick,
}

impl App {
    fn new() -> Self {
        Self {
            red: 0,
            green: 0,
            blue: 255,
            hex_input: String::new(),
            connected: false,
            mode_label: String::new(),
            battery: None,
            status: "Scanning for devices...".into(),
            last_poll: Instant::now(),
            auto_poll: true,
        }
    }

    fn subscription(&self) -> Subscription<Message> {
        if self.auto_poll {
            iced::time::every(POLL_INTERVAL).map(|_| Message::PollTick)
        } else {
            Subscription::none()
        }
    }

    fn current_color(&self) -> Color {
        Color::new(self.red, self.green, self.blue)
    }

    fn poll_device(&mut self) {
        match open_ds_hub_core::device::discover_devices() {
            Ok(devices) if !devices.is_empty() => {
                let was_disconnected = !self.connected;
                self.connected = true;
                let dev = &devices[0];
                self.mode_label = dev.mode.to_string();
                if was_disconnected {
                    self.status = format!("Connected: {} via {}", dev.model.name(), dev.mode);
                }
            }
            Ok(_) => {
                let was_connected = self.connected;
                self.connected = false;
                self.battery = None;
                if was_connected {
                    self.status = "Controller disconnected.".into();
                } else {
                    self.status = "No DualSense controllers found.".into();
                }
            }
            Err(e) => {
                self.connected = false;
                self.status = format!("Scan error: {e}");
            }
        }
        self.last_poll = Instant::now();
    }

    fn update(&mut self, message: Message) -> IcedTask<Message> {
        match message {
            Message::RedChanged(val) => {
                self.red = val;
            }
            Message::GreenChanged(val) => {
                self.green = val;
            }
            Message::BlueChanged(val) => {
                self.blue = val;
            }
            Message::HexChanged(value) => {
                self.hex_input = value;
            }
            Message::ApplyHex => match Color::from_hex(&self.hex_input) {
                Some(color) => {
                    self.red = color.r;
                    self.green = color.g;
                    self.blue = color.b;
                    self.status = format!("Color set to {color} (not yet applied)");
                }
                None => {
                    self.status = format!(
                        "Invalid hex color '{}'. Use RRGGBB, e.g. ff8000.",
                        self.hex_input
                    );
                }
            },
            Message::ApplyColor => match GuiHidTransport::open_first_supported() {
                Ok(transport) => {
                    let mode = transport.mode;
                    match open_ds_hub_core::lightbar::set_color(
                        &transport,
                        mode,
                        self.red as u16,
                        self.green as u16,
                        self.blue as u16,
                        true,
                    ) {
                        Ok(_) => {
                            self.status =
                                format!("Applied {} via {mode}", self.current_color());
                        }
                        Err(e) => self.status = format!("Apply error: {e}"),
                    }
                }
                Err(e) => {
                    self.status = format!("Connection error: {e}");
                }
            },
            Message::ReadStatus => match GuiHidTransport::open_first_supported() {
                Ok(transport) => {
                    match open_ds_hub_core::lightbar::read_status(&transport, READ_TIMEOUT_MS) {
                        Ok(snap) => {
                            self.battery = Some((snap.battery_percent, snap.charging));
                            self.status = format!(
                                "Battery {}%{}",
                                snap.battery_percent,
                                match snap.charging {
                                    Some(true) => ", charging",
                                    Some(false) => ", on battery",
                                    None => "",
                                }
                            );
                        }
                        Err(e) => self.status = format!("Status read error: {e}"),
                    }
                }
                Err(e) => {
                    self.status = format!("Connection error: {e}");
                }
            },
            Message::RefreshDevice => {
                self.poll_device();
            }
            Message::PollTick => {
                self.poll_device();
            }
        }
        IcedTask::none()
    }

    fn view(&self) -> Element<'_, Message> {
        let status_icon = if self.connected { "[OK]" } else { "[--]" };
        let status_text = if self.connected {
            format!("Controller connected ({})", self.mode_label)
        } else {
            "Controller disconnected".to_string()
        };

        let header = column![
            text("Open DS Hub").size(34),
            text("Set the DualSense lightbar color and read controller status").size(16),
        ]
        .spacing(4);

        let device_card = container(
            column![
                text("Device").size(20),
                row![
                    text(format!("{status_icon} {status_text}")).size(16),
                    button("Refresh").on_press(Message::RefreshDevice),
                    button("Read Status").on_press(Message::ReadStatus),
                ]
                .spacing(14),
                text(&self.status).size(14),
            ]
            .spacing(8),
        )
        .padding(14)
        .width(Length::Fill);

        let channel_row = |label: &'static str, value: u8, msg: fn(u8) -> Message| {
            row![
                text(label).size(15).width(Length::Fixed(60.0)),
                slider(0.0..=255.0, value as f64, move |v| msg(v as u8)),
                text(format!("{value}")).size(15).width(Length::Fixed(40.0)),
            ]
            .spacing(10)
        };

        let color_card = container(
            column![
                text("Lightbar").size(20),
                text(format!("Color: {}", self.current_color())).size(16),
                channel_row("Red", self.red, Message::RedChanged),
                channel_row("Green", self.green, Message::GreenChanged),
                channel_row("Blue", self.blue, Message::BlueChanged),
                row![
                    text_input("Hex (RRGGBB)", &self.hex_input)
                        .on_input(Message::HexChanged)
                        .width(Length::Fill),
                    button("Set From Hex").on_press(Message::ApplyHex),
                ]
                .spacing(10),
            ]
            .spacing(10),
        )
        .padding(14)
        .width(Length::Fill);

        let battery_line = match self.battery {
            Some((percent, charging)) => format!(
                "Battery: {percent}%{}",
                match charging {
                    Some(true) => " (charging)",
                    Some(false) => " (on battery)",
                    None => "",
                }
            ),
            None => "Battery: unknown (press Read Status)".to_string(),
        };

        let actions = row![
            button("Apply Color").on_press(Message::ApplyColor),
            text(battery_line),
            text(format!(
                "Last poll: {}s ago",
                self.last_poll.elapsed().as_secs()
            )),
        ]
        .spacing(12);

        let content = column![header, device_card, color_card, actions]
            .spacing(14)
            .padding(20)
            .max_width(980);

        container(content)
            .width(Length::Fill)
            .height(Length::Fill)
            .center_x(Length::Fill)
            .into()
    }
}
