use bitwire::{Bounded, Decode, Encode, FixedBlob, Tagged, WireEnum, to_bytes};
use std::net::{Ipv4Addr, SocketAddrV4};

#[derive(WireEnum, Debug, Clone, Copy, PartialEq)]
enum Kind {
    Hello,
    Chat,
    Error,
}

#[derive(Encode, Decode, Debug, PartialEq)]
#[wire(tag = Kind::Hello)]
struct Hello {
    id: u16,
    endpoint: SocketAddrV4,
}

#[derive(Encode, Decode, Debug, PartialEq)]
#[wire(tag = Kind::Chat)]
struct Chat {
    id: u16,
    room: Bounded<u8, 1, 12>,
    text: FixedBlob<32>,
}

fn handle(buf: &[u8]) -> bitwire::Result<()> {
    let mut reader = bitwire::BitReader::new(buf);
    match reader.read_enum::<Kind>()? {
        Kind::Hello => println!("hello: {:?}", Hello::decode_body(&mut reader)?),
        Kind::Chat => println!("chat: {:?}", Chat::decode_body(&mut reader)?),
        Kind::Error => println!("unknown packet kind"),
    }
    Ok(())
}

fn main() {
    let hello = Hello {
        id: 1,
        endpoint: SocketAddrV4::new(Ipv4Addr::LOCALHOST, 4000),
    };
    let chat = Chat {
        id: 2,
        room: Bounded::new(5).unwrap(),
        text: FixedBlob::from_slice(b"hi there").unwrap(),
    };

    let mut buf = [0u8; 64];
    let used = to_bytes(&hello, &mut buf).unwrap();
    println!("hello: {used} bytes, {} bits", hello.bit_len());
    handle(&buf[..used]).unwrap();

    let used = to_bytes(&chat, &mut buf).unwrap();
    println!("chat: {used} bytes, {} bits", chat.bit_len());
    handle(&buf[..used]).unwrap();

    // Too small for the fixed part: nothing is written.
    let mut tiny = [0u8; 2];
    println!("tiny buffer: {:?}", to_bytes(&chat, &mut tiny));
}
