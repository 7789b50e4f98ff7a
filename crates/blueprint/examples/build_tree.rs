//! Builds a small tree, walks it, and moves it through the codecs.

use blueprint::{
    decode_blueprint, encode_blueprint_with_options, from_base64, guess_encoding, to_base64,
    Blueprint, EncodeOptions, Encoding, ObjectBuilder, Text, NATIVE_ENDIAN,
};

fn describe(value: &Blueprint, indent: usize) {
    let pad = "  ".repeat(indent);
    match value {
        Blueprint::Array(children) => {
            println!("{pad}array ({} elements)", children.len());
            for child in children {
                describe(child, indent + 1);
            }
        }
        Blueprint::Object(children) => {
            println!("{pad}object ({} keys)", children.len());
            for (key, child) in children {
                println!("{pad}  {key}:");
                describe(child, indent + 2);
            }
        }
        other => println!("{pad}{} = {other}", other.kind().name()),
    }
}

fn main() {
    println!("native byte order: {:?}", *NATIVE_ENDIAN);

    let mut tree = ObjectBuilder::new()
        .string("name", "caf\u{e9} \u{1F600}")
        .integer("port", 8080)
        .float("ratio", 0.75)
        .array("hosts", |a| a.string("alpha").string("beta").null())
        .object("tls", |o| o.boolean("enabled", true))
        .build();

    if let Some(hosts) = tree.get_mut("hosts").and_then(Blueprint::as_array_mut) {
        hosts.push(Blueprint::from("gamma"));
    }

    println!("\n=== Tree ===");
    describe(&tree, 0);
    println!("\njson-like: {tree}");
    println!("missing lookup is invalid: {}", tree["nope"]["deeper"].is_invalid());

    println!("\n=== Binary ===");
    let bytes = match encode_blueprint_with_options(&tree, EncodeOptions::canonical()) {
        Ok(bytes) => bytes,
        Err(e) => {
            eprintln!("encode failed: {e}");
            std::process::exit(1);
        }
    };
    println!("encoded {} bytes", bytes.len());

    let encoded = to_base64(&bytes);
    println!("base64: {encoded}");

    match decode_blueprint(from_base64(&encoded).as_slice()) {
        Ok(decoded) => println!("round trip equal: {}", decoded == tree),
        Err(e) => eprintln!("decode failed: {e}"),
    }

    println!("\n=== Text ===");
    let name = Text::from(tree["name"].as_str());
    let utf16 = name.to_bytes(Encoding::Utf16Little);
    let mut with_bom = Encoding::Utf16Little.bom().to_vec();
    with_bom.extend_from_slice(utf16.as_slice());

    let guessed = guess_encoding(&with_bom);
    println!("{} code points, {} UTF-16 units, guessed {guessed:?}", name.len(), name.to_utf16().len());
    println!("decoded back: {}", Text::from_bytes(&with_bom, Encoding::Unknown));

    let mut cursor = name.end();
    cursor.step_back();
    println!("last character: {:?}", cursor.get());
}
