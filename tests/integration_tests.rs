use libtwai::driver::mock::MockDriver;
use libtwai::{singleton, Baudrate, BusConfig, DriverError, FrameType, TwaiBus, TwaiError};

#[test]
fn test_loopback_round_trip() {
    let mut bus = TwaiBus::new(MockDriver::new());
    bus.begin(&BusConfig::new(4, 5, Baudrate::Rate500K)).unwrap();

    bus.write(FrameType::Standard, 0x123, &[1, 2, 3]).unwrap();

    let frame = bus.read().unwrap().expect("frame should be pending");
    assert_eq!(frame.id, 0x123);
    assert_eq!(frame.frame_type, FrameType::Standard);
    assert_eq!(frame.dlc, 3);
    assert_eq!(frame.payload(), &[1, 2, 3]);

    // Queue drained, a second read reports no data
    assert_eq!(bus.read().unwrap(), None);

    bus.stop().unwrap();
}

#[test]
fn test_stop_and_restart_cycle() {
    let config = BusConfig::new(21, 22, Baudrate::Rate250K);
    let mut bus = TwaiBus::new(MockDriver::new());

    bus.begin(&config).unwrap();
    bus.write(FrameType::Extended, 0x1ABC_DEF0, &[0xAA]).unwrap();
    bus.stop().unwrap();
    assert!(!bus.is_running());

    // Same parameters succeed again after release
    bus.begin(&config).unwrap();
    assert!(bus.is_running());
    assert_eq!(bus.read().unwrap(), None);
    bus.stop().unwrap();
}

#[test]
fn test_error_text_through_public_surface() {
    let mut bus = TwaiBus::new(MockDriver::new());

    let mut config = BusConfig::new(4, 5, Baudrate::Rate500K);
    config.bit_rate = 42;
    let err = bus.begin(&config).unwrap_err();
    assert_eq!(err, TwaiError::UnsupportedBitRate(42));
    assert_eq!(bus.error_text(&err), "TWAI SPEED: ESP_ERR_NOT_SUPPORTED");

    config.bit_rate = 500;
    bus.begin(&config).unwrap();
    let err = bus.write(FrameType::Standard, 0x7FF, &[0; 12]).unwrap_err();
    assert_eq!(bus.error_text(&err), "TWAI TX: ESP_ERR_NO_MEM");

    bus.stop().unwrap();
}

#[test]
fn test_singleton_shim() {
    assert!(singleton::init(Box::new(MockDriver::new())));
    // A second init keeps the original instance
    assert!(!singleton::init(Box::new(MockDriver::new())));

    let shared = singleton::bus().expect("singleton installed");
    let mut bus = shared.lock().unwrap();

    bus.begin(&BusConfig::new(4, 5, Baudrate::Rate125K)).unwrap();
    bus.write(FrameType::Standard, 0x55, &[7, 7]).unwrap();

    let frame = bus.read().unwrap().unwrap();
    assert_eq!(frame.id, 0x55);
    assert_eq!(frame.payload(), &[7, 7]);

    bus.stop().unwrap();
}

#[test]
fn test_driver_failures_surface_once_verbatim() {
    let mut bus = TwaiBus::new(MockDriver::new().fail_install(DriverError::NoMem));
    let err = bus
        .begin(&BusConfig::new(4, 5, Baudrate::Rate1M))
        .unwrap_err();
    assert_eq!(err, TwaiError::Driver(DriverError::NoMem));
    assert!(!bus.is_running());
}
