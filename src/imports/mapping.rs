// file: src/imports/mapping.rs
// description: python standard library names and import-to-distribution table
// reference: python module index, common pypi naming mismatches

use lazy_static::lazy_static;
use std::collections::{HashMap, HashSet};

lazy_static! {
    pub static ref STDLIB_MODULES: HashSet<&'static str> = [
        "__future__", "_thread", "abc", "aifc", "argparse", "array", "ast", "asynchat",
        "asyncio", "asyncore", "atexit", "audioop", "base64", "bdb", "binascii", "bisect",
        "builtins", "bz2", "calendar", "cgi", "cgitb", "chunk", "cmath", "cmd", "code",
        "codecs", "codeop", "collections", "colorsys", "compileall", "concurrent",
        "configparser", "contextlib", "contextvars", "copy", "copyreg", "cProfile", "crypt",
        "csv", "ctypes", "curses", "dataclasses", "datetime", "dbm", "decimal", "difflib",
        "dis", "doctest", "email", "encodings", "ensurepip", "enum", "errno", "faulthandler",
        "fcntl", "filecmp", "fileinput", "fnmatch", "fractions", "ftplib", "functools", "gc",
        "getopt", "getpass", "gettext", "glob", "graphlib", "grp", "gzip", "hashlib", "heapq",
        "hmac", "html", "http", "imaplib", "imghdr", "imp", "importlib", "inspect", "io",
        "ipaddress", "itertools", "json", "keyword", "lib2to3", "linecache", "locale",
        "logging", "lzma", "mailbox", "mailcap", "marshal", "math", "mimetypes", "mmap",
        "modulefinder", "msvcrt", "multiprocessing", "netrc", "nntplib", "numbers",
        "operator", "optparse", "os", "pathlib", "pdb", "pickle", "pickletools", "pipes",
        "pkgutil", "platform", "plistlib", "poplib", "posix", "pprint", "profile", "pstats",
        "pty", "pwd", "py_compile", "pyclbr", "pydoc", "queue", "quopri", "random", "re",
        "readline", "reprlib", "resource", "rlcompleter", "runpy", "sched", "secrets",
        "select", "selectors", "shelve", "shlex", "shutil", "signal", "site", "smtplib",
        "sndhdr", "socket", "socketserver", "sqlite3", "ssl", "stat", "statistics", "string",
        "stringprep", "struct", "subprocess", "sunau", "symtable", "sys", "sysconfig",
        "syslog", "tabnanny", "tarfile", "telnetlib", "tempfile", "termios", "textwrap",
        "threading", "time", "timeit", "tkinter", "token", "tokenize", "tomllib", "trace",
        "traceback", "tracemalloc", "tty", "turtle", "types", "typing", "unicodedata",
        "unittest", "urllib", "uu", "uuid", "venv", "warnings", "wave", "weakref",
        "webbrowser", "winreg", "winsound", "wsgiref", "xdrlib", "xml", "xmlrpc", "zipapp",
        "zipfile", "zipimport", "zlib", "zoneinfo",
    ]
    .into_iter()
    .collect();

    pub static ref KNOWN_DISTRIBUTIONS: HashMap<&'static str, &'static str> = [
        ("sklearn", "scikit-learn"),
        ("skimage", "scikit-image"),
        ("docx", "python-docx"),
        ("pptx", "python-pptx"),
        ("fitz", "pymupdf"),
        ("extract_msg", "extract-msg"),
        ("yaml", "pyyaml"),
        ("cv2", "opencv-python"),
        ("PIL", "pillow"),
        ("bs4", "beautifulsoup4"),
        ("dateutil", "python-dateutil"),
        ("dotenv", "python-dotenv"),
        ("multipart", "python-multipart"),
        ("magic", "python-magic"),
        ("jwt", "pyjwt"),
        ("attr", "attrs"),
        ("Crypto", "pycryptodome"),
        ("OpenSSL", "pyopenssl"),
        ("git", "gitpython"),
        ("zmq", "pyzmq"),
        ("serial", "pyserial"),
        ("usb", "pyusb"),
        ("MySQLdb", "mysqlclient"),
        ("win32api", "pywin32"),
        ("win32com", "pywin32"),
        ("Levenshtein", "python-levenshtein"),
        ("gi", "pygobject"),
        ("pkg_resources", "setuptools"),
        ("sentence_transformers", "sentence-transformers"),
        ("google", "protobuf"),
    ]
    .into_iter()
    .collect();
}

pub fn is_stdlib(module: &str) -> bool {
    STDLIB_MODULES.contains(module)
}

/// Built-in distribution name for a top-level module, if it differs from the module name.
pub fn known_distribution(module: &str) -> Option<&'static str> {
    KNOWN_DISTRIBUTIONS.get(module).copied()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stdlib_lookup() {
        assert!(is_stdlib("os"));
        assert!(is_stdlib("sqlite3"));
        assert!(is_stdlib("collections"));
        assert!(!is_stdlib("numpy"));
    }

    #[test]
    fn test_known_distributions() {
        assert_eq!(known_distribution("sklearn"), Some("scikit-learn"));
        assert_eq!(known_distribution("docx"), Some("python-docx"));
        assert_eq!(known_distribution("numpy"), None);
    }
}
