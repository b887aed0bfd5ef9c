mod command_transport;

pub use command_transport::ReqwestCommandTransport;
