use huffcipher::{decode_with_original, encode_phrase};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let phrase = "Hello, world! Huffman encoding is a greedy algorithm that builds optimal prefix codes.";

    println!("📝 Phrase: {:?} ({} symbols)", phrase, phrase.chars().count());

    let encoded = encode_phrase(phrase)?;
    let bits = encoded.encoded_message.to_string();

    println!("🔑 Codebook:");
    for (symbol, code) in encoded.codebook.iter() {
        println!("  {:?} -> {}", symbol, code);
    }

    let fixed_bits = phrase.chars().count() * 8;
    println!(
        "🗜️  Encoded to: {} bits ({:.1}% of {} bits at 8 bits/symbol)",
        bits.len(),
        bits.len() as f64 / fixed_bits as f64 * 100.0,
        fixed_bits
    );

    println!("🌳 Tree:\n{}", encoded.tree);

    // The decoder only gets the bits and the phrase, never the tree
    let decoded = decode_with_original(&bits, phrase)?;

    if decoded == phrase {
        println!("✅ Decoding successful! Phrase matches exactly.");
    } else {
        println!("❌ Decoding failed! Phrase mismatch.");
        return Err("Decoding verification failed".into());
    }

    Ok(())
}
