extern crate bindgen;

use std::env;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

const RELEASE_BASE_URL: &str = "https://github.com/catboost/catboost/releases/download";

fn get_catboost_version() -> String {
    env::var("CATBOOST_VERSION").unwrap_or_else(|_| "1.2.7".to_string())
}

fn get_platform_info() -> (String, String) {
    let target = env::var("TARGET").unwrap();

    // Determine OS
    let os = if target.contains("apple-darwin") {
        "darwin"
    } else if target.contains("linux") {
        "linux"
    } else if target.contains("windows") {
        "windows"
    } else {
        panic!("Unsupported target: {}", target);
    };

    // Determine architecture
    let arch = if target.contains("x86_64") {
        "x86_64"
    } else if target.contains("aarch64") || target.contains("arm64") {
        "aarch64"
    } else {
        panic!("Unsupported architecture for target: {}", target);
    };

    (os.to_string(), arch.to_string())
}

fn download_to(url: &str, dest: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let response = ureq::get(url).call()?;
    let status = response.status();
    if !(200..300).contains(&status) {
        return Err(format!("Failed to download {}: HTTP {}", url, status).into());
    }

    let mut file = fs::File::create(dest)?;
    io::copy(&mut response.into_reader(), &mut file)?;
    Ok(())
}

fn download_catboost_headers(include_dir: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let version = get_catboost_version();
    fs::create_dir_all(include_dir)?;

    // The model interface header is self-contained: it only pulls in stdbool/stddef/stdint
    let c_api_url = format!(
        "https://raw.githubusercontent.com/catboost/catboost/v{}/catboost/libs/model_interface/c_api.h",
        version
    );

    println!("cargo:warning=Downloading c_api.h from: {}", c_api_url);
    download_to(&c_api_url, &include_dir.join("c_api.h"))
}

fn download_compiled_library(lib_dir: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let (os, arch) = get_platform_info();
    let version = get_catboost_version();

    fs::create_dir_all(lib_dir)?;

    // Release assets are published per platform as bare shared libraries
    match (os.as_str(), arch.as_str()) {
        ("darwin", "aarch64") | ("darwin", "x86_64") => {
            // A single universal2 dylib covers both architectures
            let url = format!(
                "{}/v{}/libcatboostmodel-darwin-universal2-{}.dylib",
                RELEASE_BASE_URL, version, version
            );
            println!(
                "cargo:warning=Downloading CatBoost v{} macOS library from: {}",
                version, url
            );
            download_to(&url, &lib_dir.join("libcatboostmodel.dylib"))?;
        }

        ("linux", "aarch64") | ("linux", "x86_64") => {
            let url = format!(
                "{}/v{}/libcatboostmodel-linux-{}-{}.so",
                RELEASE_BASE_URL, version, arch, version
            );
            println!(
                "cargo:warning=Downloading CatBoost v{} Linux {} library from: {}",
                version, arch, url
            );
            download_to(&url, &lib_dir.join("libcatboostmodel.so"))?;
        }

        ("windows", "x86_64") => {
            // Windows needs both the DLL and its import library
            let dll_url = format!(
                "{}/v{}/catboostmodel-windows-x86_64-{}.dll",
                RELEASE_BASE_URL, version, version
            );
            let lib_url = format!(
                "{}/v{}/catboostmodel-windows-x86_64-{}.lib",
                RELEASE_BASE_URL, version, version
            );
            println!(
                "cargo:warning=Downloading CatBoost v{} Windows x86_64 library from: {}",
                version, dll_url
            );
            download_to(&dll_url, &lib_dir.join("catboostmodel.dll"))?;
            download_to(&lib_url, &lib_dir.join("catboostmodel.lib"))?;
        }

        ("windows", "aarch64") => {
            return Err("Windows ARM64 is not currently supported by CatBoost releases. Please use x86_64 Windows or build libcatboostmodel from source and set CATBOOST_LIB_DIR.".into());
        }

        _ => {
            return Err(format!(
                "Unsupported platform/architecture combination: {} / {}",
                os, arch
            )
            .into());
        }
    }

    Ok(())
}

fn main() {
    println!("cargo:rerun-if-changed=wrapper.h");
    println!("cargo:rerun-if-env-changed=CATBOOST_VERSION");
    println!("cargo:rerun-if-env-changed=CATBOOST_INCLUDE_DIR");
    println!("cargo:rerun-if-env-changed=CATBOOST_LIB_DIR");

    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());

    // A local install takes precedence over downloading
    let include_dir = match env::var("CATBOOST_INCLUDE_DIR") {
        Ok(dir) => PathBuf::from(dir),
        Err(_) => {
            let dir = out_dir.join("include");
            if let Err(e) = download_catboost_headers(&dir) {
                eprintln!("Failed to download CatBoost headers: {}", e);
                panic!("Cannot proceed without headers");
            }
            dir
        }
    };

    let (lib_search_path, downloaded) = match env::var("CATBOOST_LIB_DIR") {
        Ok(dir) => (PathBuf::from(dir), false),
        Err(_) => {
            let dir = out_dir.join("libs");
            if let Err(e) = download_compiled_library(&dir) {
                eprintln!("Failed to download compiled library: {}", e);
                panic!("Cannot proceed without compiled library");
            }
            (dir, true)
        }
    };

    let bindings = bindgen::Builder::default()
        .header("wrapper.h")
        .clang_arg(format!("-I{}", include_dir.display()))
        // Only the model calcer surface is needed for inference
        .allowlist_function("ModelCalcer.*")
        .allowlist_function("LoadFullModelFrom.*")
        .allowlist_function("CalcModelPrediction")
        .allowlist_function("CalcModelPredictionSingle")
        .allowlist_function("Get(FloatFeatures|CatFeatures|Tree|Dimensions)Count")
        .allowlist_function("GetErrorString")
        .allowlist_type("ModelCalcerHandle")
        .size_t_is_usize(true)
        .generate()
        .expect("Unable to generate bindings.");

    bindings
        .write_to_file(out_dir.join("bindings.rs"))
        .expect("Couldn't write bindings.");

    let (os, _arch) = get_platform_info();

    let lib_filename = match os.as_str() {
        "windows" => "catboostmodel.dll",
        "darwin" => "libcatboostmodel.dylib",
        _ => "libcatboostmodel.so",
    };

    // Copy the downloaded library next to the final binaries (e.g., target/release)
    if downloaded {
        let lib_source_path = lib_search_path.join(lib_filename);
        let target_dir = out_dir
            .ancestors()
            .find(|p| p.ends_with("target"))
            .unwrap()
            .join(env::var("PROFILE").unwrap());

        let lib_dest_path = target_dir.join(lib_filename);
        fs::copy(&lib_source_path, &lib_dest_path)
            .expect("Failed to copy library to target directory");
    }

    println!(
        "cargo:rustc-link-search=native={}",
        lib_search_path.display()
    );

    // Set the rpath for the run-time linker based on the OS
    match os.as_str() {
        "darwin" => {
            println!("cargo:rustc-link-arg=-Wl,-rpath,@executable_path");
            println!("cargo:rustc-link-arg=-Wl,-rpath,@executable_path/../..");
            println!(
                "cargo:rustc-link-arg=-Wl,-rpath,{}",
                lib_search_path.display()
            );
            println!("cargo:rustc-link-lib=dylib=catboostmodel");
        }
        "linux" => {
            println!("cargo:rustc-link-arg=-Wl,-rpath,$ORIGIN");
            println!("cargo:rustc-link-arg=-Wl,-rpath,$ORIGIN/../..");
            println!(
                "cargo:rustc-link-arg=-Wl,-rpath,{}",
                lib_search_path.display()
            );
            println!("cargo:rustc-link-lib=dylib=catboostmodel");
        }
        "windows" => {
            // The DLL sits next to the binaries; the import library is used at link time
            println!("cargo:rustc-link-lib=dylib=catboostmodel");
        }
        _ => {}
    }
}
