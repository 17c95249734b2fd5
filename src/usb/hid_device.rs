//! USB HID composite device - keyboard + consumer control.
//!
//! Initialises the Embassy USB stack on the RP2040 USB controller and
//! exposes two HID endpoints. [`UsbHid`] is the control loop's command
//! sink: every command becomes a press report followed by a release.

use crate::board::Irqs;
use defmt::info;
use embassy_rp::peripherals::USB;
use embassy_rp::usb::Driver;
use embassy_usb::class::hid::{Config as HidConfig, HidWriter, State};
use embassy_usb::{Builder, Config, UsbDevice};
use mediaboard::config;
use mediaboard::hid::consumer::CONSUMER_REPORT_DESCRIPTOR;
use mediaboard::hid::keyboard::KEYBOARD_REPORT_DESCRIPTOR;
use mediaboard::hid::{Command, HidReport, HidSink};
use mediaboard::Error;
use static_cell::StaticCell;

type UsbDriver = Driver<'static, USB>;

static KB_STATE: StaticCell<State> = StaticCell::new();
static CONSUMER_STATE: StaticCell<State> = StaticCell::new();
static USB_CONFIG_DESC: StaticCell<[u8; 256]> = StaticCell::new();
static USB_BOS_DESC: StaticCell<[u8; 256]> = StaticCell::new();
static USB_MSOS_DESC: StaticCell<[u8; 256]> = StaticCell::new();
static USB_CTRL_BUF: StaticCell<[u8; 128]> = StaticCell::new();

/// Build result containing the USB device runner and the HID sink.
pub struct UsbHidDevice {
    pub device: UsbDevice<'static, UsbDriver>,
    pub hid: UsbHid,
}

/// Initialise the USB stack and create the composite HID device.
///
/// Must be called exactly once. All static buffers are consumed here.
pub fn init(usb: USB) -> UsbHidDevice {
    let driver = Driver::new(usb, Irqs);

    // USB device-level configuration.
    let mut usb_config = Config::new(config::USB_VID, config::USB_PID);
    usb_config.manufacturer = Some(config::USB_MANUFACTURER);
    usb_config.product = Some(config::USB_PRODUCT);
    usb_config.serial_number = Some(config::USB_SERIAL_NUMBER);
    usb_config.max_power = 100; // mA
    usb_config.max_packet_size_0 = 64;

    // Allocate static descriptor buffers.
    let config_desc = USB_CONFIG_DESC.init([0u8; 256]);
    let bos_desc = USB_BOS_DESC.init([0u8; 256]);
    let msos_desc = USB_MSOS_DESC.init([0u8; 256]);
    let ctrl_buf = USB_CTRL_BUF.init([0u8; 128]);

    let mut builder = Builder::new(
        driver,
        usb_config,
        config_desc,
        bos_desc,
        msos_desc,
        ctrl_buf,
    );

    let kb_state = KB_STATE.init(State::new());
    let kb_config = HidConfig {
        report_descriptor: KEYBOARD_REPORT_DESCRIPTOR,
        request_handler: None,
        poll_ms: config::USB_HID_POLL_MS,
        max_packet_size: 8,
    };
    let keyboard = HidWriter::new(&mut builder, kb_state, kb_config);

    let consumer_state = CONSUMER_STATE.init(State::new());
    let consumer_config = HidConfig {
        report_descriptor: CONSUMER_REPORT_DESCRIPTOR,
        request_handler: None,
        poll_ms: config::USB_HID_POLL_MS,
        max_packet_size: 8,
    };
    let consumer = HidWriter::new(&mut builder, consumer_state, consumer_config);

    let device = builder.build();

    info!("USB HID composite device initialised (keyboard + consumer)");

    UsbHidDevice {
        device,
        hid: UsbHid { keyboard, consumer },
    }
}

/// Run the USB device stack - must be spawned as a dedicated Embassy task.
///
/// This handles USB enumeration, suspend/resume, and endpoint servicing.
#[embassy_executor::task]
pub async fn run_usb_device(mut device: UsbDevice<'static, UsbDriver>) -> ! {
    info!("USB device task started");
    device.run().await
}

/// Keyboard and consumer-control endpoints.
pub struct UsbHid {
    keyboard: HidWriter<'static, UsbDriver, 8>,
    consumer: HidWriter<'static, UsbDriver, 8>,
}

impl UsbHid {
    async fn write(&mut self, report: HidReport) -> Result<(), Error> {
        let mut buf = [0u8; 8];
        let n = report.serialize(&mut buf);
        let writer = match report {
            HidReport::Keyboard(_) => &mut self.keyboard,
            HidReport::Consumer(_) => &mut self.consumer,
        };
        writer.write(&buf[..n]).await.map_err(|_| Error::Usb)
    }
}

impl HidSink for UsbHid {
    async fn send(&mut self, command: Command) -> Result<(), Error> {
        self.write(command.press()).await?;
        self.write(command.release()).await
    }
}
